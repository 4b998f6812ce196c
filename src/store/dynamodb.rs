//! DynamoDB Store
//!
//! Passport table backed by a DynamoDB table whose partition key is the
//! string attribute `address`.

use std::collections::HashMap;
use std::future::Future;

use async_trait::async_trait;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use tracing::debug;

use super::{PassportStore, StoreError, WriteCondition};
use crate::models::Passport;

type Item = HashMap<String, AttributeValue>;

const ADDRESS: &str = "address";
const SCORE: &str = "score";
const DELIVERY_DATE: &str = "deliveryDate";
const LAST_UPDATED: &str = "lastUpdated";
const TRANSACTION_ID: &str = "transactionID";

// == DynamoDB Store ==
#[derive(Debug, Clone)]
pub struct DynamoStore {
    client: Client,
    table_name: String,
}

impl DynamoStore {
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    /// Creates a client from the ambient AWS configuration (env, profile, role).
    pub async fn from_env(table_name: &str) -> Self {
        let config = aws_config::load_from_env().await;
        Self::new(Client::new(&config), table_name)
    }
}

#[async_trait]
impl PassportStore for DynamoStore {
    async fn get(&self, address: &str) -> Result<Option<Passport>, StoreError> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(ADDRESS, AttributeValue::S(address.to_string()))
            .send()
            .await
            .map_err(|e| StoreError::Backend(DisplayErrorContext(&e).to_string()))?;

        output.item().map(item_to_passport).transpose()
    }

    async fn put(&self, passport: &Passport, condition: WriteCondition) -> Result<(), StoreError> {
        let mut request = self
            .client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(passport_to_item(passport)));

        request = match condition {
            WriteCondition::Unconditional => request,
            WriteCondition::NotExists => {
                request.condition_expression("attribute_not_exists(address)")
            }
            WriteCondition::LastUpdatedEquals(previous) => request
                .condition_expression("lastUpdated = :previous")
                .expression_attribute_values(":previous", AttributeValue::N(previous.to_string())),
        };

        debug!("PutItem {} with {:?}", passport.address, condition);

        request.send().await.map_err(|e| {
            let conditional = e
                .as_service_error()
                .is_some_and(|se| se.is_conditional_check_failed_exception());
            if conditional {
                StoreError::ConditionFailed(passport.address.clone())
            } else {
                StoreError::Backend(DisplayErrorContext(&e).to_string())
            }
        })?;

        Ok(())
    }

    async fn delete(&self, address: &str) -> Result<(), StoreError> {
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .key(ADDRESS, AttributeValue::S(address.to_string()))
            .send()
            .await
            .map_err(|e| StoreError::Backend(DisplayErrorContext(&e).to_string()))?;
        Ok(())
    }

    async fn scan(&self) -> Result<Vec<Passport>, StoreError> {
        let items = scan_pages(|start_key| async move {
            let output = self
                .client
                .scan()
                .table_name(&self.table_name)
                .set_exclusive_start_key(start_key)
                .send()
                .await
                .map_err(|e| StoreError::Backend(DisplayErrorContext(&e).to_string()))?;
            let next_key = output.last_evaluated_key().cloned();
            Ok::<_, StoreError>((output.items.unwrap_or_default(), next_key))
        })
        .await?;

        debug!("Scanned {} passports from {}", items.len(), self.table_name);
        items.iter().map(item_to_passport).collect()
    }
}

/// Fetches scan pages until no `LastEvaluatedKey` is returned.
async fn scan_pages<F, Fut>(mut fetch_page: F) -> Result<Vec<Item>, StoreError>
where
    F: FnMut(Option<Item>) -> Fut,
    Fut: Future<Output = Result<(Vec<Item>, Option<Item>), StoreError>>,
{
    let mut items = Vec::new();
    let mut start_key = None;

    loop {
        let (page, next_key) = fetch_page(start_key).await?;
        items.extend(page);
        match next_key {
            Some(key) if !key.is_empty() => start_key = Some(key),
            _ => return Ok(items),
        }
    }
}

// == Item Conversion ==
fn passport_to_item(passport: &Passport) -> Item {
    let mut item = HashMap::from([
        (ADDRESS.to_string(), AttributeValue::S(passport.address.clone())),
        (SCORE.to_string(), AttributeValue::N(passport.score.to_string())),
        (
            DELIVERY_DATE.to_string(),
            AttributeValue::N(passport.delivery_date.to_string()),
        ),
        (
            LAST_UPDATED.to_string(),
            AttributeValue::N(passport.last_updated.to_string()),
        ),
    ]);
    if let Some(tx) = &passport.transaction_id {
        item.insert(TRANSACTION_ID.to_string(), AttributeValue::S(tx.clone()));
    }
    item
}

fn item_to_passport(item: &Item) -> Result<Passport, StoreError> {
    Ok(Passport {
        address: string_attr(item, ADDRESS)?,
        score: number_attr(item, SCORE)?,
        delivery_date: number_attr(item, DELIVERY_DATE)?,
        last_updated: number_attr(item, LAST_UPDATED)?,
        transaction_id: item
            .get(TRANSACTION_ID)
            .and_then(|value| value.as_s().ok())
            .cloned(),
    })
}

fn string_attr(item: &Item, name: &str) -> Result<String, StoreError> {
    item.get(name)
        .and_then(|value| value.as_s().ok())
        .cloned()
        .ok_or_else(|| StoreError::Corrupt(format!("attribute {} is not a string", name)))
}

fn number_attr(item: &Item, name: &str) -> Result<i64, StoreError> {
    item.get(name)
        .and_then(|value| value.as_n().ok())
        .and_then(|n| n.parse().ok())
        .ok_or_else(|| StoreError::Corrupt(format!("attribute {} is not an integer", name)))
}
