use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use log::{debug, error, info};
use serde::Serialize;
use thiserror::Error;

use crate::config::DashboardConfig;
use crate::data::error::DataError;
use crate::data::model::Datasets;
use crate::state::{self, CallbackRequest, SelectionOutput};
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// Dashboard application
// ---------------------------------------------------------------------------

/// Everything a request needs: the loaded tables and the rendered page.
/// Built once at startup and shared read-only.
pub struct DashboardApp {
    datasets: Datasets,
    page: String,
    pretty_json: bool,
}

#[derive(Error, Debug)]
pub enum CallbackError {
    #[error("no callback is wired to output {0:?}")]
    UnknownOutput(String),
    #[error(transparent)]
    Data(#[from] DataError),
}

impl IntoResponse for CallbackError {
    fn into_response(self) -> Response {
        let status = match self {
            CallbackError::UnknownOutput(_) => StatusCode::NOT_FOUND,
            CallbackError::Data(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, self.to_string()).into_response()
    }
}

impl DashboardApp {
    /// Build the static figures and compose the page.
    pub fn new(datasets: Datasets, config: &DashboardConfig) -> Result<Self> {
        let figures = panels::StaticFigures {
            global_temperature: plot::global_temperature_map(&datasets.global_temperature)?,
            arctic_ice: plot::arctic_ice(&datasets.arctic_ice)?,
            sea_levels: plot::sea_levels(&datasets.sea_levels)?,
            continent_temperature: plot::continent_temperature(&datasets.continent_temperature)?,
        };
        let callback = callback_url(state::HURRICANE_CONTAINER);
        let page = panels::render_page(&panels::compose(&figures), &callback)
            .context("rendering dashboard page")?;

        Ok(DashboardApp {
            datasets,
            page,
            pretty_json: config.debug,
        })
    }

    /// The rendered HTML page.
    pub fn page(&self) -> &str {
        &self.page
    }

    /// Run the selection handler wired to `output`.
    pub fn handle_callback(
        &self,
        output: &str,
        request: &CallbackRequest,
    ) -> Result<SelectionOutput, CallbackError> {
        if state::wired_inputs(output).is_none() {
            return Err(CallbackError::UnknownOutput(output.to_string()));
        }
        let trigger = request.trigger();
        debug!(
            "callback {output}: counters {:?}, trigger {trigger:?}",
            request.counters()
        );
        Ok(state::display_hurricane_data(trigger, &self.datasets)?)
    }

    pub fn router(self: Arc<Self>) -> Router {
        Router::new()
            .route("/", get(index_handler))
            .route("/_callbacks/:output", post(callback_handler))
            .with_state(self)
    }
}

pub fn callback_url(output: &str) -> String {
    format!("/_callbacks/{output}")
}

/// Bind and serve until the process is stopped.
pub async fn serve(app: DashboardApp, addr: SocketAddr) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!("Dashboard running at http://{addr}");
    axum::serve(listener, Arc::new(app).router())
        .await
        .context("serving dashboard")?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn index_handler(State(app): State<Arc<DashboardApp>>) -> Html<String> {
    Html(app.page().to_string())
}

async fn callback_handler(
    State(app): State<Arc<DashboardApp>>,
    Path(output): Path<String>,
    Json(request): Json<CallbackRequest>,
) -> Response {
    match app.handle_callback(&output, &request) {
        Ok(payload) => json_response(&payload, app.pretty_json),
        Err(err) => {
            error!("callback {output} failed: {err}");
            err.into_response()
        }
    }
}

fn json_response<T: Serialize>(value: &T, pretty: bool) -> Response {
    let body = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    match body {
        Ok(body) => ([(header::CONTENT_TYPE, "application/json")], body).into_response(),
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;
    use serde_json::Value as JsonValue;

    use super::*;
    use crate::data::model::{CellValue, Table};
    use crate::data::schema;

    fn table(source: &str, columns: &[&str], rows: Vec<Vec<CellValue>>) -> Table {
        Table::from_rows(source, columns.iter().map(|c| c.to_string()).collect(), rows)
    }

    fn datasets() -> Datasets {
        use CellValue::{Float, Integer, Text};
        let mut sea_levels = table(
            "sea_levels.csv",
            &[schema::YEAR, schema::SEA_LEVEL_INCHES],
            vec![vec![Integer(2000), Float(1.0)]],
        );
        sea_levels
            .derive_column(schema::SEA_LEVEL_MM, schema::SEA_LEVEL_INCHES, |v| {
                v * schema::MM_PER_INCH
            })
            .unwrap();

        Datasets {
            hurricane_count: table(
                "hur_data.csv",
                &[schema::YEAR, schema::HURRICANES_ADJUSTED, schema::HURRICANES_UNADJUSTED],
                vec![vec![Integer(1878), Float(9.6), Integer(12)]],
            ),
            cyclone_energy: table(
                "cyclone_energy.csv",
                &[schema::YEAR, schema::ACE],
                vec![vec![Integer(1950), Integer(243)]],
            ),
            continent_temperature: table(
                "revised_cont.csv",
                &[schema::REGION, schema::YEAR, schema::TEMP],
                vec![vec![Text("Europe".into()), Integer(1900), Float(8.1)]],
            ),
            global_temperature: table(
                "qtemp.csv",
                &[schema::COUNTRY, schema::DATE, schema::AVERAGE_TEMPERATURE],
                vec![vec![Text("Norway".into()), Text("1900-01-01".into()), Float(1.2)]],
            ),
            arctic_ice: table(
                "arctic_sea_ice.csv",
                &[schema::ICE_YEAR, schema::ICE_EXTENT, schema::ICE_AREA],
                vec![vec![Integer(1979), Float(12.33), Float(10.26)]],
            ),
            sea_levels,
        }
    }

    fn app() -> Arc<DashboardApp> {
        Arc::new(DashboardApp::new(datasets(), &DashboardConfig::default()).unwrap())
    }

    fn request(changed: &str, count: u64, energy: u64) -> CallbackRequest {
        serde_json::from_value(serde_json::json!({
            "inputs": [
                {"id": "hur_num", "property": "n_clicks", "value": count},
                {"id": "hur_energy", "property": "n_clicks", "value": energy},
            ],
            "changedPropIds": [changed],
        }))
        .unwrap()
    }

    async fn body_json(response: Response) -> JsonValue {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn index_serves_the_composed_page() {
        let Html(page) = index_handler(State(app())).await;
        assert!(page.contains("Arctic Ice Levels"));
        assert!(page.contains("/_callbacks/hurricane_container"));
    }

    #[tokio::test]
    async fn page_load_callback_is_empty() {
        let response = callback_handler(
            State(app()),
            Path(state::HURRICANE_CONTAINER.to_string()),
            Json(request(".", 0, 0)),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["output"], "hurricane_container");
        assert_eq!(body["state"], "no_selection");
        assert!(body["figure"].is_null());
    }

    #[tokio::test]
    async fn energy_click_returns_the_energy_chart() {
        let response = callback_handler(
            State(app()),
            Path(state::HURRICANE_CONTAINER.to_string()),
            Json(request("hur_energy.n_clicks", 1, 1)),
        )
        .await;

        let body = body_json(response).await;
        assert_eq!(body["state"], "showing_energy");
        assert_eq!(body["figure"]["data"][0]["y"], serde_json::json!([243]));
        assert_eq!(
            body["figure"]["layout"]["title"]["text"],
            "Acculated Cyclone Energy vs Year"
        );
    }

    #[tokio::test]
    async fn unknown_output_is_not_found() {
        let response = callback_handler(
            State(app()),
            Path("sea_levels_graph".to_string()),
            Json(request("hur_num.n_clicks", 1, 0)),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn repeated_count_clicks_render_identically() {
        let app = app();
        let click = request("hur_num.n_clicks", 1, 0);
        let first = app.handle_callback(state::HURRICANE_CONTAINER, &click).unwrap();
        let second = app.handle_callback(state::HURRICANE_CONTAINER, &click).unwrap();
        assert_eq!(first.state, state::Selection::ShowingCount);
        assert_eq!(first, second);
    }
}
