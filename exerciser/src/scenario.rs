//! The fixed product/order lifecycle run against the API. Steps that need an id or timestamp
//! an earlier step failed to produce are skipped, and the run carries on.

use crate::{
    config::ExerciserConfig,
    data::{
        order::{OrderCreateRequest, OrderItemRequest, OrderStatus, OrderStatusUpdateRequest},
        product::{Category, ProductRequest},
    },
    error::Error,
};
use chrono::{Duration, NaiveDateTime};
use replay_log::{
    extract, HttpClient, HttpMethod, RequestExecutor, ResourceId, ResponseData, Transcript,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

pub const COMPLETION_MARKER: &str = "All API calls completed.";

const PRODUCTS_PATH: &str = "/api/products";
const ORDERS_PATH: &str = "/api/orders";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScenarioState {
    pub product_ids: Vec<ResourceId>,
    pub order_id: Option<ResourceId>,
    pub created_at: Option<NaiveDateTime>,
}

impl ScenarioState {
    fn add_product(&mut self, id: ResourceId) {
        if !self.product_ids.contains(&id) {
            self.product_ids.push(id);
        }
    }
}

#[derive(Debug, Clone)]
pub struct RunReport {
    pub calls: usize,
    pub error_responses: usize,
    pub state: ScenarioState,
}

/// Runs the whole scenario, writing the transcript to the configured path.
///
/// # Arguments
/// `config` - base URL and transcript location.
/// `http_client` - transport used for every call.
///
/// # Returns
/// A summary of the run. Only transport and transcript failures end the run early; HTTP error
/// statuses are recorded and the run continues.
pub async fn run(
    config: &ExerciserConfig,
    http_client: Arc<dyn HttpClient + Send + Sync>,
) -> Result<RunReport, Error> {
    let mut transcript = Transcript::open(config.transcript_path())?;
    info!(
        base_url = config.base_url(),
        transcript = %transcript.path().display(),
        "starting scenario"
    );
    transcript.write_line(format!("Base URL: {}", config.base_url()))?;

    let mut scenario = Scenario {
        executor: RequestExecutor::new(config.base_url(), http_client, transcript),
        state: ScenarioState::default(),
    };
    scenario.run_steps().await?;

    let Scenario { executor, state } = scenario;
    let report = RunReport {
        calls: executor.calls(),
        error_responses: executor.error_responses(),
        state,
    };

    let mut transcript = executor.into_transcript();
    transcript.write_line(COMPLETION_MARKER)?;
    transcript.close()?;

    info!(
        calls = report.calls,
        error_responses = report.error_responses,
        "scenario completed"
    );

    Ok(report)
}

struct Scenario {
    executor: RequestExecutor,
    state: ScenarioState,
}

impl Scenario {
    async fn run_steps(&mut self) -> Result<(), Error> {
        self.create_product(ProductRequest::new("cold brew", 4500, 10, Category::Beverage))
            .await?;
        self.create_product(ProductRequest::new("choco cookie", 2500, 20, Category::Food))
            .await?;

        self.get(PRODUCTS_PATH, &[]).await?;
        self.get(PRODUCTS_PATH, &[("category", Category::Food.as_str().into())])
            .await?;

        if let Some(product_id) = self.state.product_ids.first().cloned() {
            self.get(&product_path(&product_id), &[]).await?;

            let update = ProductRequest::new("cold brew (renewal)", 4800, 8, Category::Beverage);
            self.send(HttpMethod::Put, &product_path(&product_id), &update)
                .await?;
        } else {
            debug!("no product id captured, skipping product lookup and update");
        }

        self.create_order().await?;

        self.get(ORDERS_PATH, &[]).await?;

        for status in [
            OrderStatus::Received,
            OrderStatus::Completed,
            OrderStatus::Canceled,
        ] {
            self.change_order_status(status).await?;
        }

        if let Some(order_id) = self.state.order_id.clone() {
            self.get(&order_path(&order_id), &[]).await?;
        }

        self.get(ORDERS_PATH, &[("status", OrderStatus::Completed.as_str().into())])
            .await?;

        if let Some(created_at) = self.state.created_at {
            let start = extract::format_timestamp(created_at - Duration::minutes(1));
            let end = extract::format_timestamp(created_at + Duration::minutes(1));
            self.get(ORDERS_PATH, &[("start", start), ("end", end)])
                .await?;
        } else {
            debug!("no order creation time captured, skipping period listing");
        }

        Ok(())
    }

    async fn create_product(&mut self, product: ProductRequest) -> Result<(), Error> {
        let response = self.send(HttpMethod::Post, PRODUCTS_PATH, &product).await?;

        match extract::extract_payload(&response.body).and_then(|p| extract::extract_id(&p)) {
            Some(id) => {
                info!(%id, name = %product.name, "product created");
                self.state.add_product(id);
            }
            None => debug!(name = %product.name, "product creation returned no id"),
        }

        Ok(())
    }

    /// Orders two of the first product and one of the second, then re-reads both products to
    /// show the stock change.
    async fn create_order(&mut self) -> Result<(), Error> {
        let (first, second) = match self.state.product_ids.as_slice() {
            [first, second, ..] => (first.clone(), second.clone()),
            _ => {
                debug!("fewer than two product ids captured, skipping order creation");
                return Ok(());
            }
        };

        let order = OrderCreateRequest {
            items: vec![
                OrderItemRequest {
                    product_id: first,
                    quantity: 2,
                },
                OrderItemRequest {
                    product_id: second,
                    quantity: 1,
                },
            ],
        };
        let response = self.send(HttpMethod::Post, ORDERS_PATH, &order).await?;

        if let Some(payload) = extract::extract_payload(&response.body) {
            self.state.order_id = extract::extract_id(&payload);
            self.state.created_at = extract::extract_created_at(&payload);
        }
        info!(
            order_id = ?self.state.order_id,
            created_at = ?self.state.created_at,
            "order creation answered"
        );

        self.refetch_products().await
    }

    async fn change_order_status(&mut self, status: OrderStatus) -> Result<(), Error> {
        let order_id = match self.state.order_id.clone() {
            Some(order_id) => order_id,
            None => {
                debug!(status = status.as_str(), "no order id captured, skipping status change");
                return Ok(());
            }
        };

        let path = format!("{}/status", order_path(&order_id));
        self.send(HttpMethod::Patch, &path, &OrderStatusUpdateRequest { status })
            .await?;

        self.refetch_products().await
    }

    async fn refetch_products(&mut self) -> Result<(), Error> {
        for product_id in self.state.product_ids.clone() {
            self.get(&product_path(&product_id), &[]).await?;
        }

        Ok(())
    }

    async fn get(&mut self, path: &str, query: &[(&str, String)]) -> Result<ResponseData, Error> {
        Ok(self
            .executor
            .execute(HttpMethod::Get, path, None, query)
            .await?)
    }

    async fn send<T: Serialize>(
        &mut self,
        method: HttpMethod,
        path: &str,
        body: &T,
    ) -> Result<ResponseData, Error> {
        let payload = serde_json::to_value(body)?;

        Ok(self
            .executor
            .execute(method, path, Some(&payload), &[])
            .await?)
    }
}

fn product_path(id: &ResourceId) -> String {
    format!("{}/{}", PRODUCTS_PATH, id)
}

fn order_path(id: &ResourceId) -> String {
    format!("{}/{}", ORDERS_PATH, id)
}
