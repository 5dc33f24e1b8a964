//! Calls on a shared client are independent of each other.

use std::sync::{Arc, Mutex};
use std::thread;

use search_sdk::{Client, HttpRequest, HttpResponse, Options, Transport};
use serde_json::json;

/// Records every request and answers 200 with an empty object.
#[derive(Default)]
struct Recorder {
    seen: Mutex<Vec<HttpRequest>>,
}

impl Transport for Recorder {
    type Error = std::convert::Infallible;

    fn perform_request(&self, request: HttpRequest) -> Result<HttpResponse, Self::Error> {
        self.seen.lock().unwrap().push(request);
        Ok(HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: "{}".to_string(),
        })
    }
}

#[test]
fn parallel_calls_do_not_share_arguments() {
    let recorder = Arc::new(Recorder::default());
    let client = Arc::new(Client::new(recorder.clone()));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let client = client.clone();
            thread::spawn(move || {
                let id = format!("pipeline-{i}");
                let options = Options::new().param("timeout", format!("{i}s"));
                let body = json!({"processors": [], "description": id});
                client.ingest().put_pipeline(&id, &body, &options).unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let seen = recorder.seen.lock().unwrap();
    assert_eq!(seen.len(), 8);
    for req in seen.iter() {
        let id = req.path.strip_prefix("/_ingest/pipeline/").unwrap();
        let i = id.strip_prefix("pipeline-").unwrap();
        assert_eq!(req.param("timeout"), Some(format!("{i}s").as_str()));
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["description"], id);
    }
}

#[test]
fn options_are_not_consumed_by_a_call() {
    let recorder = Arc::new(Recorder::default());
    let client = Client::new(recorder.clone());
    let options = Options::new().param("local", true);

    client.cluster().state(Some("nodes"), None, &options).unwrap();
    client.cluster().state(None, Some("logs"), &options).unwrap();

    let seen = recorder.seen.lock().unwrap();
    assert_eq!(seen[0].path, "/_cluster/state/nodes");
    assert_eq!(seen[1].path, "/_cluster/state/_all/logs");
    assert!(seen.iter().all(|r| r.param("local") == Some("true")));
}
