//! Prometheus request metrics behind the `metrics` feature.

use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};

/// Namespace prefixed to every exported metric.
const NAMESPACE: &str = "conference";

/// Build the middleware exporting request metrics on `/metrics`.
pub(crate) fn build_metrics() -> std::io::Result<PrometheusMetrics> {
    PrometheusMetricsBuilder::new(NAMESPACE)
        .endpoint("/metrics")
        .build()
        .map_err(|err| std::io::Error::other(format!("configure Prometheus metrics: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, HttpResponse, test, web};

    #[actix_web::test]
    async fn metrics_endpoint_exports_request_counters() {
        let app = test::init_service(
            App::new()
                .wrap(build_metrics().expect("metrics"))
                .route(
                    "/ping",
                    web::get().to(|| async { HttpResponse::Ok().finish() }),
                ),
        )
        .await;
        test::call_service(&app, test::TestRequest::get().uri("/ping").to_request()).await;

        let res =
            test::call_service(&app, test::TestRequest::get().uri("/metrics").to_request()).await;
        assert!(res.status().is_success());
        let body = test::read_body(res).await;
        let text = std::str::from_utf8(&body).expect("utf8");
        assert!(text.contains("conference_http_requests_total"), "{text}");
    }
}
