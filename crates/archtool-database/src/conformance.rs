//! Behaviour shared by every backend, run against each implementation.

use std::sync::Arc;

use archtool_core::error::ErrorKind;
use archtool_core::types::{DiagramId, PageRequest};
use archtool_entity::binding::UpsertBinding;
use archtool_entity::diagram::model::INITIAL_REVISION;
use archtool_entity::diagram::{CreateDiagram, DiagramFilter, UpdateDiagram};

use crate::Stores;

fn new_diagram(name: &str, owner: Option<i64>) -> CreateDiagram {
    CreateDiagram {
        name: name.to_string(),
        registry_type: Some("application".to_string()),
        content: "<xml/>".to_string(),
        owner_id: owner,
    }
}

fn rename(name: &str, expected: Option<i32>) -> UpdateDiagram {
    UpdateDiagram {
        name: Some(name.to_string()),
        content: None,
        expected_revision: expected,
        modified_by: Some(1),
    }
}

fn bind(diagram_id: DiagramId, element: &str, object_id: &str, by: Option<i64>) -> UpsertBinding {
    UpsertBinding {
        diagram_id,
        element_id: element.to_string(),
        object_type: "application".to_string(),
        object_id: object_id.to_string(),
        created_by: by,
    }
}

pub(crate) async fn revision_counts_updates(stores: Stores) {
    let store = &stores.diagrams;
    let d = store.create(&new_diagram("Flow", Some(1))).await.unwrap();
    assert_eq!(d.revision, INITIAL_REVISION);

    for n in 0..5 {
        let updated = store
            .update(d.id, &rename(&format!("Flow {n}"), None))
            .await
            .unwrap();
        assert_eq!(updated.revision, INITIAL_REVISION + n + 1);
    }

    let versions = store
        .list_versions(d.id, &PageRequest::default())
        .await
        .unwrap();
    assert_eq!(versions.total, 5);
    let revisions: Vec<i32> = versions.items.iter().map(|v| v.revision).collect();
    assert_eq!(revisions, vec![5, 4, 3, 2, 1]);
    assert_eq!(versions.items[4].name, "Flow");
    assert_eq!(versions.items[0].name, "Flow 3");
}

pub(crate) async fn stale_update_is_rejected(stores: Stores) {
    let store = &stores.diagrams;
    let d = store.create(&new_diagram("Flow A", None)).await.unwrap();
    assert_eq!(d.revision, 1);

    let v2 = store.update(d.id, &rename("Flow A v2", Some(1))).await.unwrap();
    assert_eq!(v2.revision, 2);
    assert_eq!(v2.name, "Flow A v2");
    assert_eq!(v2.content, "<xml/>");

    let snapshot = store.find_version(d.id, 1).await.unwrap().unwrap();
    assert_eq!(snapshot.name, "Flow A");
    assert_eq!(snapshot.modified_by, Some(1));

    let err = store
        .update(d.id, &rename("Flow A v3", Some(1)))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);
    assert_eq!(err.current_revision(), Some(2));

    let current = store.find_by_id(d.id).await.unwrap().unwrap();
    assert_eq!(current.revision, 2);
    assert_eq!(current.name, "Flow A v2");
    let versions = store
        .list_versions(d.id, &PageRequest::default())
        .await
        .unwrap();
    assert_eq!(versions.total, 1);
}

pub(crate) async fn concurrent_updates_one_wins(stores: Stores) {
    let store = Arc::clone(&stores.diagrams);
    let d = store.create(&new_diagram("Race", None)).await.unwrap();

    let a = rename("left", Some(1));
    let b = rename("right", Some(1));
    let (left, right) = tokio::join!(store.update(d.id, &a), store.update(d.id, &b));

    let outcomes = [left.is_ok(), right.is_ok()];
    assert_eq!(outcomes.iter().filter(|ok| **ok).count(), 1);
    let loser = if left.is_err() { left } else { right };
    let err = loser.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);
    assert_eq!(err.current_revision(), Some(2));

    let current = store.find_by_id(d.id).await.unwrap().unwrap();
    assert_eq!(current.revision, 2);
    let versions = store
        .list_versions(d.id, &PageRequest::default())
        .await
        .unwrap();
    assert_eq!(versions.total, 1);
}

pub(crate) async fn unconditional_update_always_advances(stores: Stores) {
    let store = &stores.diagrams;
    let d = store.create(&new_diagram("Loose", None)).await.unwrap();

    let changes = UpdateDiagram {
        content: Some("<xml><cell/></xml>".to_string()),
        ..Default::default()
    };
    let updated = store.update(d.id, &changes).await.unwrap();
    assert_eq!(updated.revision, 2);
    assert_eq!(updated.name, "Loose");
    assert_eq!(updated.content, "<xml><cell/></xml>");
    assert!(updated.updated_at >= d.updated_at);

    let empty = store.update(d.id, &UpdateDiagram::default()).await.unwrap();
    assert_eq!(empty.revision, 3);
    assert_eq!(empty.content, "<xml><cell/></xml>");
    assert_eq!(
        store
            .list_versions(d.id, &PageRequest::default())
            .await
            .unwrap()
            .total,
        2
    );
}

pub(crate) async fn missing_diagram_is_not_found(stores: Stores) {
    let store = &stores.diagrams;
    let ghost = DiagramId::new();

    assert!(store.find_by_id(ghost).await.unwrap().is_none());
    let err = store.update(ghost, &rename("x", None)).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
    let err = store.delete(ghost).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
    assert!(store.find_version(ghost, 1).await.unwrap().is_none());
    assert_eq!(
        store
            .list_versions(ghost, &PageRequest::default())
            .await
            .unwrap()
            .total,
        0
    );
}

pub(crate) async fn list_filters_and_pages(stores: Stores) {
    let store = &stores.diagrams;

    let empty = store
        .list(&DiagramFilter::default(), &PageRequest::new(Some(10), Some(5)))
        .await
        .unwrap();
    assert!(empty.items.is_empty());
    assert_eq!(empty.total, 0);

    let first = store.create(&new_diagram("Payments flow", Some(1))).await.unwrap();
    store.create(&new_diagram("Billing", Some(2))).await.unwrap();
    store.create(&new_diagram("PAYMENTS overview", Some(2))).await.unwrap();
    store.update(first.id, &rename("Payments flow v2", None)).await.unwrap();

    let all = store
        .list(&DiagramFilter::default(), &PageRequest::default())
        .await
        .unwrap();
    assert_eq!(all.total, 3);
    assert_eq!(all.items[0].id, first.id);

    let search = DiagramFilter {
        owner_id: None,
        query: Some("payments".to_string()),
    };
    let found = store.list(&search, &PageRequest::default()).await.unwrap();
    assert_eq!(found.total, 2);

    let owned = DiagramFilter {
        owner_id: Some(2),
        query: Some("pay".to_string()),
    };
    let found = store.list(&owned, &PageRequest::default()).await.unwrap();
    assert_eq!(found.total, 1);
    assert_eq!(found.items[0].name, "PAYMENTS overview");

    let page = store
        .list(&DiagramFilter::default(), &PageRequest::new(Some(2), Some(2)))
        .await
        .unwrap();
    assert_eq!(page.total, 3);
    assert_eq!(page.items.len(), 1);
}

pub(crate) async fn upsert_replaces_and_keeps_id(stores: Stores) {
    let d = stores
        .diagrams
        .create(&new_diagram("Bound", None))
        .await
        .unwrap();
    let index = &stores.bindings;

    let first = index.upsert(&bind(d.id, "cell-1", "app-42", Some(1))).await.unwrap();
    let second = index.upsert(&bind(d.id, "cell-1", "app-99", Some(2))).await.unwrap();
    assert_eq!(first.id, second.id);

    let found = index.find_by_element(d.id, "cell-1").await.unwrap().unwrap();
    assert_eq!(found, second);
    assert_eq!(found.object_id, "app-99");
    assert_eq!(found.created_by, Some(2));

    let other = index.upsert(&bind(d.id, "cell-2", "app-1", None)).await.unwrap();
    assert_ne!(other.id, first.id);
}

pub(crate) async fn delete_binding_is_idempotent(stores: Stores) {
    let d = stores
        .diagrams
        .create(&new_diagram("Bound", None))
        .await
        .unwrap();
    let index = &stores.bindings;

    let b = index.upsert(&bind(d.id, "cell-1", "app-42", None)).await.unwrap();
    assert_eq!(index.delete_by_element(d.id, "cell-1").await.unwrap(), 1);
    assert_eq!(index.delete_by_element(d.id, "cell-1").await.unwrap(), 0);
    assert!(index.find_by_element(d.id, "cell-1").await.unwrap().is_none());
    assert_eq!(index.delete_by_id(d.id, b.id).await.unwrap(), 0);

    let b = index.upsert(&bind(d.id, "cell-3", "app-7", None)).await.unwrap();
    assert_eq!(index.delete_by_id(DiagramId::new(), b.id).await.unwrap(), 0);
    assert_eq!(index.delete_by_id(d.id, b.id).await.unwrap(), 1);
}

pub(crate) async fn delete_diagram_reaps_bindings(stores: Stores) {
    let store = &stores.diagrams;
    let index = &stores.bindings;
    let d = store.create(&new_diagram("Doomed", None)).await.unwrap();
    store.update(d.id, &rename("Doomed v2", None)).await.unwrap();
    index.upsert(&bind(d.id, "cell-1", "app-1", None)).await.unwrap();
    index.upsert(&bind(d.id, "cell-2", "app-2", None)).await.unwrap();

    store.delete(d.id).await.unwrap();

    assert!(store.find_by_id(d.id).await.unwrap().is_none());
    assert!(index.find_by_element(d.id, "cell-1").await.unwrap().is_none());
    assert!(index.find_by_element(d.id, "cell-2").await.unwrap().is_none());
    // History is append-only and survives the diagram.
    assert!(store.find_version(d.id, 1).await.unwrap().is_some());

    let err = index
        .upsert(&bind(d.id, "cell-1", "app-1", None))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}

macro_rules! conformance_suite {
    ($($name:ident),* $(,)?) => {
        mod memory_backend {
            $(
                #[tokio::test]
                async fn $name() {
                    super::$name(crate::Stores::memory()).await;
                }
            )*
        }

        mod postgres_backend {
            $(
                #[sqlx::test(migrator = "crate::migration::MIGRATOR")]
                #[ignore = "requires PostgreSQL (set DATABASE_URL)"]
                async fn $name(pool: sqlx::PgPool) {
                    let stores = crate::Stores::postgres(crate::DatabasePool::from_pool(pool));
                    super::$name(stores).await;
                }
            )*
        }
    };
}

conformance_suite!(
    revision_counts_updates,
    stale_update_is_rejected,
    concurrent_updates_one_wins,
    unconditional_update_always_advances,
    missing_diagram_is_not_found,
    list_filters_and_pages,
    upsert_replaces_and_keeps_id,
    delete_binding_is_idempotent,
    delete_diagram_reaps_bindings,
);
