//! Generated API documentation: OpenAPI document plus a Swagger UI page.

use crate::config::ServerConfig;
use crate::error::ErrorBody;
use crate::routes::calculate::{CalculationResponse, OperationToken};
use axum::response::Html;
use utoipa::openapi::server::ServerBuilder;
use utoipa::OpenApi;

pub const DOCS_PATH: &str = "/api-docs";
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "API de Cálculo",
        version = "1.0.0",
        description = "Uma API simples para realizar cálculos matemáticos"
    ),
    paths(crate::routes::calculate::calculate),
    components(schemas(CalculationResponse, ErrorBody, OperationToken)),
    tags((name = "calculator", description = "Operações aritméticas"))
)]
pub struct ApiDoc;

/// Build the OpenAPI document advertised for this server.
pub fn openapi(config: &ServerConfig) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.servers = Some(vec![ServerBuilder::new()
        .url(config.public_url())
        .description(Some("Servidor local"))
        .build()]);
    doc
}

const SWAGGER_UI_HTML: &str = r##"<!doctype html>
<html lang="pt-BR">
  <head>
    <meta charset="utf-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1" />
    <title>API de Cálculo</title>
    <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css" />
  </head>
  <body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js" crossorigin></script>
    <script>
      window.onload = () => {
        window.ui = SwaggerUIBundle({ url: "/api-docs/openapi.json", dom_id: "#swagger-ui" });
      };
    </script>
  </body>
</html>
"##;

/// Interactive documentation page
pub async fn swagger_ui() -> Html<&'static str> {
    Html(SWAGGER_UI_HTML)
}
