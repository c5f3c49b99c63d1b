//! Table and column names of the `sample` database

/// Organizations: caller-supplied id, created by insert, deleted by name.
pub mod company {
    pub const TABLE: &str = "company";
    pub const ID: &str = "COMPANY_ID";
    pub const NAME: &str = "COMPANY_NAME";
    pub const CITY: &str = "COMPANY_CITY";
}

/// Customers: read-only, filtered by country.
pub mod customer {
    pub const TABLE: &str = "customer";
    pub const COUNTRY: &str = "CUST_COUNTRY";
}

/// Catalog items: renamed by id.
pub mod foods {
    pub const TABLE: &str = "foods";
    pub const ID: &str = "ITEM_ID";
    pub const NAME: &str = "ITEM_NAME";
}

/// Enrolled persons: keyed by (CLASS, SECTION, ROLLID).
pub mod student {
    pub const TABLE: &str = "student";
    pub const NAME: &str = "NAME";
    pub const TITLE: &str = "TITLE";
    pub const CLASS: &str = "CLASS";
    pub const SECTION: &str = "SECTION";
    pub const ROLL_ID: &str = "ROLLID";
}
