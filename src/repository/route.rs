//! Route repository

use crate::db::{QueryExecutor, Statement};
use crate::domain::{CreateRouteInput, Route, StringUuid};
use crate::error::Result;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RouteRepository: Send + Sync {
    async fn create(&self, input: &CreateRouteInput) -> Result<Route>;
    async fn list(&self) -> Result<Vec<Route>>;
    async fn list_by_page(&self, node_guid: StringUuid) -> Result<Vec<Route>>;
}

pub struct RouteRepositoryImpl {
    db: QueryExecutor,
}

impl RouteRepositoryImpl {
    pub fn new(db: QueryExecutor) -> Self {
        Self { db }
    }
}

/// `DELETE FROM route WHERE nodeGuid = ?`
pub fn delete_by_page(node_guid: StringUuid) -> Statement {
    Statement::write("DELETE FROM route WHERE nodeGuid = ?").bind(node_guid)
}

#[async_trait]
impl RouteRepository for RouteRepositoryImpl {
    async fn create(&self, input: &CreateRouteInput) -> Result<Route> {
        self.db
            .write(
                Statement::write(
                    r#"
                    INSERT INTO route (nodeGuid, path, routeType, appScreenName)
                    VALUES (?, ?, ?, ?)
                    "#,
                )
                .bind(input.node_guid)
                .bind(&input.path)
                .bind(&input.route_type)
                .bind(&input.app_screen_name),
            )
            .await?;

        Ok(Route {
            node_guid: input.node_guid,
            path: input.path.clone(),
            route_type: input.route_type.clone(),
            app_screen_name: input.app_screen_name.clone(),
        })
    }

    async fn list(&self) -> Result<Vec<Route>> {
        self.db
            .fetch_all(Statement::read(
                "SELECT nodeGuid, path, routeType, appScreenName FROM route",
            ))
            .await
    }

    async fn list_by_page(&self, node_guid: StringUuid) -> Result<Vec<Route>> {
        self.db
            .fetch_all(
                Statement::read(
                    r#"
                    SELECT nodeGuid, path, routeType, appScreenName
                    FROM route
                    WHERE nodeGuid = ?
                    "#,
                )
                .bind(node_guid),
            )
            .await
    }
}
