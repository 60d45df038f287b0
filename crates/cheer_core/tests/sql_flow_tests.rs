//! The cheer pipeline end to end on an in-memory SQLite store

use cheer_common::{BoxFuture, PushRequest, PushService};
use cheer_config::{CheerConfig, Environment};
use cheer_core::params::{ReturnCheerInput, Sender};
use cheer_core::queries::SubmitFeedback;
use cheer_core::{
    CheerService, CheerServiceError, RegisterInstallation, BANNED_SENDER_RESULT, SEND_SUCCESS,
};
use cheer_db::{CounterRepository, DbClient, InstallationRefRepository, SqlStore};
use std::sync::{Arc, Mutex};

#[derive(Debug, thiserror::Error)]
#[error("push rejected")]
struct Rejected;

#[derive(Debug, Clone, Default)]
struct Outbox {
    sent: Arc<Mutex<Vec<PushRequest>>>,
    reject: bool,
}

impl Outbox {
    fn sent(&self) -> Vec<PushRequest> {
        self.sent.lock().unwrap().clone()
    }
}

impl PushService for Outbox {
    type Error = Rejected;

    fn send(&self, request: PushRequest) -> BoxFuture<'_, String, Self::Error> {
        Box::pin(async move {
            if self.reject {
                return Err(Rejected);
            }
            let mut sent = self.sent.lock().unwrap();
            sent.push(request);
            Ok(format!("push-{}", sent.len()))
        })
    }
}

async fn memory_store() -> SqlStore {
    let db_client = DbClient::from_url("sqlite::memory:").await.unwrap();
    let store = SqlStore::new(db_client, Environment::Production);
    store.init_schema().await.unwrap();
    store
}

fn service_with(store: &SqlStore, outbox: &Outbox, banned: &[&str]) -> CheerService<SqlStore, Outbox> {
    CheerService::new(
        store.clone(),
        outbox.clone(),
        Arc::new(CheerConfig {
            environment: Environment::Production,
            banned_installation_ids: banned.iter().map(|id| id.to_string()).collect(),
            app_identifiers: Vec::new(),
        }),
    )
}

/// Bare registration: no app name, identifier or token
fn bare(installation_id: &str) -> RegisterInstallation {
    RegisterInstallation {
        installation_id: installation_id.to_string(),
        app_name: None,
        app_identifier: None,
        device_token: None,
    }
}

fn sender(installation_id: &str, name: &str, location: &str) -> Sender {
    Sender {
        from_user_id: format!("user-{}", installation_id),
        from_installation_id: installation_id.to_string(),
        from_name: name.to_string(),
        from_location: location.to_string(),
    }
}

#[tokio::test]
async fn test_sole_registrant_has_no_one_to_cheer() {
    let store = memory_store().await;
    let outbox = Outbox::default();
    let service = service_with(&store, &outbox, &[]);

    service.registry().register_installation(bare("A1")).await.unwrap();

    let err = service
        .dispatcher()
        .send_random_cheer(sender("A1", "Comet", "Reykjavik"))
        .await
        .unwrap_err();
    assert!(matches!(err, CheerServiceError::NoInstallationFound));
    assert!(outbox.sent().is_empty());
}

#[tokio::test]
async fn test_send_return_and_list_round_trip() {
    let store = memory_store().await;
    let outbox = Outbox::default();
    let service = service_with(&store, &outbox, &[]);

    for id in ["A1", "B1"] {
        let saved = service.registry().register_installation(bare(id)).await.unwrap();
        assert!(saved.is_new_record);
    }
    assert_eq!(service.installation_count().await.unwrap(), 2);

    let sent = service
        .dispatcher()
        .send_random_cheer(sender("A1", "Comet", "Reykjavik"))
        .await
        .unwrap();
    assert_eq!(sent, SEND_SUCCESS);

    let received = service.queries().list_received_cheers("B1").await.unwrap();
    assert_eq!(received.len(), 1);
    let original = &received[0];
    assert!(original.is_initiator());
    assert!(!original.has_been_responded_to);
    assert_eq!(original.from_installation_id, "A1");
    assert_eq!(original.message, "Comet sent you some Christmas cheer from Reykjavik");

    let pushes = outbox.sent();
    assert_eq!(pushes.len(), 1);
    assert_eq!(pushes[0].installation_id, "B1");
    assert_eq!(pushes[0].payload.data["originalNoteId"], original.id);

    let returned = service
        .responder()
        .return_cheer(ReturnCheerInput {
            original_note_id: original.id.clone(),
            sender: sender("B1", "Vixen", "Tromso"),
        })
        .await
        .unwrap();
    assert_eq!(
        returned,
        "Succesfully returned christmas cheer push from installation id: B1 to installationId:A1"
    );

    let original_now = service.queries().get_cheer(&original.id).await.unwrap();
    assert!(original_now.has_been_responded_to);

    let replies = service.queries().list_received_cheers("A1").await.unwrap();
    assert_eq!(replies.len(), 1);
    assert_eq!(replies[0].initiation_note_id.as_deref(), Some(original.id.as_str()));
    assert!(replies[0].has_been_responded_to);
    assert_eq!(replies[0].message, "Vixen from Tromso returned your Christmas cheer!");

    let pushes = outbox.sent();
    assert_eq!(pushes.len(), 2);
    assert_eq!(pushes[1].installation_id, "A1");
    assert_eq!(pushes[1].payload.data["isResponse"], "true");
}

#[tokio::test]
async fn test_reregistration_keeps_a_single_ref() {
    let store = memory_store().await;
    let outbox = Outbox::default();
    let service = service_with(&store, &outbox, &[]);

    service.registry().register_installation(bare("A1")).await.unwrap();
    let again = service
        .registry()
        .register_installation(RegisterInstallation {
            device_token: Some("token-A1".to_string()),
            ..bare("A1")
        })
        .await
        .unwrap();

    assert!(!again.is_new_record);
    assert_eq!(again.installation.app_name, None);
    assert_eq!(store.get_count().await.unwrap(), Some(1));
    let indexed = store.find_ref_by_installation("A1").await.unwrap().unwrap();
    assert_eq!(indexed.app_name, None);
}

#[tokio::test]
async fn test_banned_sender_leaves_no_trace() {
    let store = memory_store().await;
    let outbox = Outbox::default();
    let service = service_with(&store, &outbox, &["A1"]);
    for id in ["A1", "B1"] {
        service.registry().register_installation(bare(id)).await.unwrap();
    }

    let result = service
        .dispatcher()
        .send_random_cheer(sender("A1", "Comet", "Reykjavik"))
        .await
        .unwrap();

    assert_eq!(result, BANNED_SENDER_RESULT);
    assert!(service.queries().list_received_cheers("B1").await.unwrap().is_empty());
    assert!(outbox.sent().is_empty());
}

#[tokio::test]
async fn test_rejected_push_keeps_stored_cheer() {
    let store = memory_store().await;
    let outbox = Outbox {
        reject: true,
        ..Outbox::default()
    };
    let service = service_with(&store, &outbox, &[]);
    for id in ["A1", "B1"] {
        service.registry().register_installation(bare(id)).await.unwrap();
    }

    let err = service
        .dispatcher()
        .send_random_cheer(sender("A1", "Comet", "Reykjavik"))
        .await
        .unwrap_err();

    assert!(matches!(err, CheerServiceError::PushDeliveryFailure(_)));
    assert_eq!(service.queries().list_received_cheers("B1").await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_unknown_cheer_and_feedback() {
    let store = memory_store().await;
    let outbox = Outbox::default();
    let service = service_with(&store, &outbox, &[]);

    let err = service.queries().get_cheer("missing").await.unwrap_err();
    assert!(matches!(err, CheerServiceError::NotFound(_)));

    let stored = service
        .queries()
        .submit_feedback(SubmitFeedback {
            text: "More snow please".to_string(),
            user_id: "user-A1".to_string(),
            installation_id: "A1".to_string(),
            name: "Comet".to_string(),
            location_description: "Reykjavik".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(stored.text, "More snow please");
}
