use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use campaign_client::{
    ApiSettings, ClientCommand, ClientEvent, ClientHandle, CountQuery, ReqwestCampaignApi,
};

#[tokio::test(flavor = "multi_thread")]
async fn handle_round_trips_commands_to_events() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/numbers/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "total": 42 })))
        .mount(&server)
        .await;

    let settings = ApiSettings::new(Url::parse(&server.uri()).expect("server url"));
    let api = Arc::new(ReqwestCampaignApi::new(settings).expect("client"));
    let (handle, events) = ClientHandle::new(api);

    handle.send(ClientCommand::FetchCount {
        epoch: 7,
        query: CountQuery {
            status: None,
            search: None,
        },
    });

    // The IO thread runs its own runtime; block this (multi-threaded) test
    // runtime on the channel.
    let event = tokio::task::spawn_blocking(move || {
        events
            .recv_timeout(Duration::from_secs(5))
            .expect("event within deadline")
    })
    .await
    .expect("join");

    assert_eq!(
        event,
        ClientEvent::Count {
            epoch: 7,
            result: Ok(42),
        }
    );
}
