use crate::error::{ErrorBody, ServerError, ServerResult};
use axum::extract::rejection::QueryRejection;
use axum::extract::Query;
use axum::Json;
use calcapi::{CalculationRequest, Evaluation};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Query parameters of `GET /calculate`, kept as raw text.
///
/// Every field is optional at the transport level so that an absent
/// parameter surfaces as a calculation error instead of an extractor
/// rejection. A repeated key keeps all its values joined with `,`, so
/// `num1=1&num1=2` reads as `"1,2"` (and parses as `1`).
#[derive(Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CalculateQuery {
    /// Primeiro número
    #[param(required = true, value_type = f64, example = 3)]
    pub num1: Option<String>,

    /// Segundo número
    #[param(required = true, value_type = f64, example = 4)]
    pub num2: Option<String>,

    /// Operação matemática a ser realizada
    #[param(required = true, value_type = OperationToken)]
    pub operation: Option<String>,
}

impl CalculateQuery {
    /// Collect the decoded query pairs, ignoring unrelated keys.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut query = CalculateQuery::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "num1" => &mut query.num1,
                "num2" => &mut query.num2,
                "operation" => &mut query.operation,
                _ => continue,
            };
            match slot {
                Some(existing) => {
                    existing.push(',');
                    existing.push_str(&value);
                }
                None => *slot = Some(value),
            }
        }
        query
    }
}

impl From<CalculateQuery> for CalculationRequest {
    fn from(query: CalculateQuery) -> Self {
        CalculationRequest {
            num1: query.num1,
            num2: query.num2,
            operation: query.operation,
        }
    }
}

/// Operator tokens as advertised in the API documentation.
#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
pub enum OperationToken {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Subtract,
    #[serde(rename = "x")]
    Multiply,
    #[serde(rename = "/")]
    Divide,
}

/// Successful calculation
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CalculationResponse {
    /// Resultado do cálculo
    #[schema(example = 7)]
    pub result: f64,
}

/// Realiza um cálculo simples
///
/// Applies `operation` to `num1` and `num2`. A literal `+` must be sent
/// percent-encoded (`%2B`) or as a space.
#[utoipa::path(
    get,
    path = "/calculate",
    tag = "calculator",
    params(CalculateQuery),
    responses(
        (status = 200, description = "Resultado do cálculo", body = CalculationResponse),
        (status = 400, description = "Erro na solicitação", body = ErrorBody),
    )
)]
pub async fn calculate(
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> ServerResult<Json<CalculationResponse>> {
    let Query(pairs) = query.map_err(|rejection| ServerError::BadRequest(rejection.body_text()))?;
    let request = CalculationRequest::from(CalculateQuery::from_pairs(pairs));

    let evaluation = calcapi::evaluate(&request);
    record_outcome(&request, &evaluation);

    Ok(Json(CalculationResponse {
        result: evaluation.result?,
    }))
}

fn record_outcome(request: &CalculationRequest, evaluation: &Evaluation) {
    let operation = match (&request.operation, evaluation.operator) {
        (None, _) => "missing",
        (Some(_), Some(op)) => op.token(),
        (Some(_), None) => "unknown",
    };
    let outcome = match evaluation.result {
        Ok(_) => "ok",
        Err(err) => err.code(),
    };

    metrics::counter!(
        "calc_requests_total",
        "operation" => operation,
        "outcome" => outcome
    )
    .increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use metrics_exporter_prometheus::PrometheusBuilder;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn repeated_keys_are_joined_with_commas() {
        let query = CalculateQuery::from_pairs(pairs(&[
            ("num1", "1"),
            ("num1", "2"),
            ("num2", "3"),
            ("operation", "x"),
            ("debug", "1"),
        ]));
        assert_eq!(query.num1.as_deref(), Some("1,2"));
        assert_eq!(query.num2.as_deref(), Some("3"));
        assert_eq!(query.operation.as_deref(), Some("x"));
    }

    #[test]
    fn absent_keys_stay_absent() {
        let query = CalculateQuery::from_pairs(pairs(&[("num2", "2")]));
        assert!(query.num1.is_none());
        assert!(query.operation.is_none());
    }

    #[test]
    fn outcome_counter_is_labelled_by_operation_and_result() {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();

        let requests = [
            CalculationRequest::new("10", "0", "%2F"),
            CalculationRequest::new("3", "4", "+"),
            CalculationRequest::new("3", "4", "%"),
            CalculationRequest {
                operation: None,
                ..CalculationRequest::new("3", "4", "+")
            },
        ];
        metrics::with_local_recorder(&recorder, || {
            for request in &requests {
                record_outcome(request, &calcapi::evaluate(request));
            }
        });

        let rendered = handle.render();
        for line in [
            r#"calc_requests_total{operation="/",outcome="DIVISION_BY_ZERO"} 1"#,
            r#"calc_requests_total{operation="+",outcome="ok"} 1"#,
            r#"calc_requests_total{operation="unknown",outcome="UNKNOWN_OPERATION"} 1"#,
            r#"calc_requests_total{operation="missing",outcome="MISSING_PARAMETERS"} 1"#,
        ] {
            assert!(rendered.contains(line), "missing {line:?} in:\n{rendered}");
        }
    }
}
