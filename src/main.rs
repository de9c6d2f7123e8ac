// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

use anyhow::Result;
use clap::Parser;
use futures::StreamExt;
use k8s_openapi::api::core::v1::{Endpoints, Service};
use kube::runtime::controller::{Action, Controller};
use kube::runtime::reflector::ObjectRef;
use kube::runtime::watcher;
use kube::{Api, Client};
use readvertiser::constants::ERROR_REQUEUE_SECS;
use readvertiser::context::{Context, EndpointIdentity};
use readvertiser::errors::ReconcileError;
use readvertiser::events::KubeEventSink;
use readvertiser::metrics;
use readvertiser::options::Options;
use readvertiser::reconcilers::{reconcile_endpoints, Outcome};
use readvertiser::resolver::HickoryResolver;
use readvertiser::store::KubeEndpointsStore;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

fn main() -> Result<()> {
    // Build Tokio runtime with custom thread names
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .thread_name("readvertiser")
        .enable_all()
        .build()?;

    runtime.block_on(async_main())
}

async fn async_main() -> Result<()> {
    // Initialize logging with custom format
    //
    // Respects RUST_LOG environment variable if set, otherwise defaults to INFO level
    // Example: RUST_LOG=debug readvertiser
    //
    // Respects RUST_LOG_FORMAT environment variable for output format
    // Example: RUST_LOG_FORMAT=json readvertiser
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let log_format = std::env::var("RUST_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    match log_format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_file(true)
                .with_line_number(true)
                .with_thread_names(true)
                .with_target(false)
                .json()
                .init();
        }
        _ => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_file(true)
                .with_line_number(true)
                .with_thread_names(true)
                .with_target(false)
                .with_ansi(true)
                .compact()
                .init();
        }
    }

    let opts = Options::parse();
    opts.validate()?;

    info!(
        service = %format!("{}/{}", opts.service_namespace, opts.service_name),
        endpoint = %format!("{}/{}", opts.endpoint_namespace, opts.endpoint_name),
        refresh = ?opts.hostname_refresh_period,
        "Starting load-balancer endpoint readvertiser"
    );

    debug!("Initializing Kubernetes client");
    let client = Client::try_default().await?;

    let endpoints_api: Api<Endpoints> = Api::namespaced(client.clone(), &opts.endpoint_namespace);
    let services_api: Api<Service> = Api::namespaced(client.clone(), &opts.service_namespace);

    let resolver = HickoryResolver::from_system_conf()?;

    let ctx = Arc::new(Context {
        store: Arc::new(KubeEndpointsStore::new(
            endpoints_api.clone(),
            opts.endpoint_namespace.clone(),
        )),
        resolver: Arc::new(resolver),
        events: Arc::new(KubeEventSink::new(client.clone())),
        endpoint: EndpointIdentity {
            name: opts.endpoint_name.clone(),
            namespace: opts.endpoint_namespace.clone(),
        },
        service_name: opts.service_name.clone(),
        hostname_refresh: opts.hostname_refresh_period,
    });

    // Watch the single monitored service; also watch the target endpoint
    // record and map its events back to the service, so an out-of-band
    // change to the record triggers a corrective pass.
    let service_ref =
        ObjectRef::<Service>::new(&opts.service_name).within(&opts.service_namespace);
    let service_selector = format!("metadata.name={}", opts.service_name);
    let endpoint_selector = format!("metadata.name={}", opts.endpoint_name);

    let controller = Controller::new(
        services_api,
        watcher::Config::default().fields(&service_selector),
    )
    .watches(
        endpoints_api,
        watcher::Config::default().fields(&endpoint_selector),
        move |_endpoints| std::iter::once(service_ref.clone()),
    )
    .shutdown_on_signal()
    .run(reconcile_wrapper, error_policy, ctx)
    .for_each(|result| async move {
        match result {
            Ok((object, _action)) => debug!(object = %object, "reconciled"),
            Err(err) => error!(error = %err, "reconciliation errored"),
        }
    });

    debug!(addr = %opts.metrics_addr, "Starting metrics listener");
    let listener = tokio::net::TcpListener::bind(&opts.metrics_addr).await?;
    let metrics_server = async move { axum::serve(listener, metrics::router()).await };

    tokio::select! {
        () = controller => {
            info!("Controller stream terminated, shutting down");
        }
        result = metrics_server => {
            error!("CRITICAL: metrics server exited unexpectedly: {:?}", result);
            result?;
            anyhow::bail!("metrics server exited unexpectedly without error")
        }
    }

    Ok(())
}

/// Map a pass result onto the controller's scheduling decision.
///
/// Success with hostname-derived addresses arms the deferred re-check;
/// success without them waits for the next change notification. Failures
/// propagate to [`error_policy`].
async fn reconcile_wrapper(
    service: Arc<Service>,
    ctx: Arc<Context>,
) -> Result<Action, ReconcileError> {
    let start = Instant::now();

    match reconcile_endpoints(&ctx, &service).await {
        Ok(result) => {
            metrics::record_reconciliation(result.outcome.as_str(), start.elapsed());
            match result.outcome {
                Outcome::Created => {
                    metrics::ENDPOINT_WRITES_TOTAL
                        .with_label_values(&["create"])
                        .inc();
                }
                Outcome::Updated => {
                    metrics::ENDPOINT_WRITES_TOTAL
                        .with_label_values(&["update"])
                        .inc();
                }
                Outcome::NoOp => {}
            }

            if result.has_hostnames {
                // Hostname-backed addresses can change without any
                // cluster-side notification.
                Ok(Action::requeue(ctx.hostname_refresh))
            } else {
                Ok(Action::await_change())
            }
        }
        Err(err) => {
            metrics::record_reconciliation("error", start.elapsed());
            if matches!(err, ReconcileError::Resolution(_)) {
                metrics::RESOLUTION_FAILURES_TOTAL.inc();
            }
            Err(err)
        }
    }
}

/// Retry/backoff collaborator for failed passes: the pass itself never
/// retries, it is re-triggered from here.
fn error_policy(_service: Arc<Service>, err: &ReconcileError, _ctx: Arc<Context>) -> Action {
    error!(error = %err, transient = err.is_transient(), "Failed to reconcile endpoint record");
    Action::requeue(Duration::from_secs(ERROR_REQUEUE_SECS))
}
