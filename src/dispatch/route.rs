//! Route keys recognized by the dispatcher.

use std::fmt;

/// One of the four supported (method, resource path) pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    DeletePassport,
    GetPassport,
    ListPassports,
    PutPassport,
}

impl Route {
    pub const ALL: [Route; 4] = [
        Route::DeletePassport,
        Route::GetPassport,
        Route::ListPassports,
        Route::PutPassport,
    ];

    /// Parses an exact route key such as `GET /passports/{address}`.
    pub fn from_route_key(route_key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|route| route.route_key() == route_key)
    }

    pub fn route_key(&self) -> &'static str {
        match self {
            Route::DeletePassport => "DELETE /passports/{address}",
            Route::GetPassport => "GET /passports/{address}",
            Route::ListPassports => "GET /passports",
            Route::PutPassport => "PUT /passports",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.route_key())
    }
}
