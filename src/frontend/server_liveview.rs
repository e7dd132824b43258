use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::{ws::WebSocketUpgrade, Path},
    response::Html,
    routing::get,
    Router,
};
use tracing::{error, info, warn};

use super::app::chat_page;
use super::page::host_page;
use crate::config::Config;
use crate::host::{Responder, Session, Store, Treatments};

pub async fn start_server(config: Config) -> Result<()> {
    let store = Store::open(&config.database_url)?;
    let responder = Arc::new(Responder::from_config(&config));
    let treatments = Arc::new(Treatments::from_config(&config));
    let reachable_addr = config.reachable_addr.clone();
    let title = config.page_title.clone();

    let view = dioxus_liveview::LiveViewPool::new();

    let app = Router::new()
        .route(
            "/",
            get(|| async { "Open /chat/<participant> to start a conversation." }),
        )
        .route(
            "/chat/:participant",
            get(move |Path(participant): Path<String>| async move {
                let ws_url = format!("ws://{reachable_addr}/ws/{participant}");
                Html(host_page(&title, &ws_url))
            }),
        )
        .route(
            "/ws/:participant",
            get(
                move |Path(participant): Path<String>, ws: WebSocketUpgrade| async move {
                    ws.on_upgrade(move |socket| async move {
                        let session = Session::new(participant.clone(), responder, treatments, store);
                        let (page, host) = match session.open().await {
                            Ok(opened) => opened,
                            Err(err) => {
                                error!(%participant, "failed to open session: {err:#}");
                                return;
                            }
                        };
                        tokio::spawn(host.serve());

                        if let Err(err) = view
                            .launch_with_props(dioxus_liveview::axum_socket(socket), chat_page, page)
                            .await
                        {
                            warn!(%participant, "liveview ended: {err:?}");
                        }
                    })
                },
            ),
        );

    info!(addr = %config.listen_addr, "listening");

    axum::Server::bind(&config.listen_addr)
        .serve(app.into_make_service())
        .await?;
    Ok(())
}
