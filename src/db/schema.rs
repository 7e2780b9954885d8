//! Idempotent table bootstrap
//!
//! Creates the catalog tables when they are missing. There is no versioning
//! here; existing tables are left untouched.

use super::executor::QueryExecutor;
use super::value::Statement;
use crate::error::Result;
use tracing::info;

/// Parents before children so the foreign keys resolve
pub const TABLES: &[(&str, &str)] = &[
    (
        "products",
        r#"
        CREATE TABLE IF NOT EXISTS products (
            id INT AUTO_INCREMENT PRIMARY KEY,
            name VARCHAR(255) NOT NULL,
            price DECIMAL(10, 2) NOT NULL,
            image VARCHAR(255),
            styles JSON
        )
        "#,
    ),
    (
        "productImageSliders",
        r#"
        CREATE TABLE IF NOT EXISTS productImageSliders (
            id INT AUTO_INCREMENT PRIMARY KEY,
            productId INT NOT NULL,
            images JSON NOT NULL,
            paginationType VARCHAR(50),
            sliderStyles JSON,
            imageStyles JSON,
            UNIQUE (productId),
            FOREIGN KEY (productId) REFERENCES products(id)
                ON UPDATE CASCADE
                ON DELETE CASCADE
        )
        "#,
    ),
    (
        "specifications",
        r#"
        CREATE TABLE IF NOT EXISTS specifications (
            id INT AUTO_INCREMENT PRIMARY KEY,
            productInfoModulesId INT NOT NULL,
            title VARCHAR(255) NOT NULL,
            value VARCHAR(255) NOT NULL,
            FOREIGN KEY (productInfoModulesId) REFERENCES products(id)
                ON UPDATE CASCADE
                ON DELETE CASCADE
        )
        "#,
    ),
    (
        "pages",
        r#"
        CREATE TABLE IF NOT EXISTS pages (
            nodeGuid CHAR(36) PRIMARY KEY,
            pageName VARCHAR(255) NOT NULL UNIQUE,
            path VARCHAR(255) NOT NULL,
            routeType VARCHAR(50) NOT NULL,
            appScreenName VARCHAR(100) NOT NULL
        )
        "#,
    ),
    (
        "route",
        r#"
        CREATE TABLE IF NOT EXISTS route (
            nodeGuid CHAR(36),
            path VARCHAR(255) NOT NULL,
            routeType VARCHAR(50) NOT NULL,
            appScreenName VARCHAR(100) NOT NULL,
            FOREIGN KEY (nodeGuid) REFERENCES pages(nodeGuid)
                ON UPDATE CASCADE
                ON DELETE CASCADE
        )
        "#,
    ),
    (
        "category",
        r#"
        CREATE TABLE IF NOT EXISTS category (
            nodeGuid CHAR(36),
            name VARCHAR(255) NOT NULL,
            icon VARCHAR(255),
            styles JSON,
            FOREIGN KEY (nodeGuid) REFERENCES pages(nodeGuid)
                ON UPDATE CASCADE
                ON DELETE CASCADE
        )
        "#,
    ),
];

/// Create any missing catalog table, one statement at a time and in order.
pub async fn ensure_schema(executor: &QueryExecutor) -> Result<()> {
    info!("Creating tables...");
    for (table, ddl) in TABLES {
        executor.write(Statement::write(*ddl)).await?;
        info!(table = *table, "Table ready");
    }
    info!("All tables created successfully");
    Ok(())
}
