mod common;

use common::{MemoryBackend, png_of_size, task};
use todolink::{BoardError, LocalImage, PendingImage, TaskBoard};
use tokio_test::assert_ok;

fn local_png(name: &str, size: usize) -> PendingImage {
    PendingImage::Local(LocalImage::from_bytes(name, png_of_size(size)).expect("png"))
}

#[tokio::test]
async fn test_create_without_image_adds_one_incomplete_row() {
    let mut board = TaskBoard::new(MemoryBackend::with_rows(vec![task(1, "Walk dog", false, None)]));
    board.refresh().await;

    let tasks = assert_ok!(board.create("Buy milk", Vec::new()).await);
    assert_eq!(tasks.len(), 2);

    let created: Vec<_> = board.tasks().iter().filter(|t| t.task == "Buy milk").collect();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].image, None);
    assert!(!created[0].complete);
    assert!(board.backend().uploads().is_empty());
}

#[tokio::test]
async fn test_create_uploads_only_first_image() {
    let mut board = TaskBoard::new(MemoryBackend::new());

    assert_ok!(
        board
            .create("Photos", vec![local_png("a.png", 64), local_png("b.png", 32)])
            .await
    );

    let uploads = board.backend().uploads();
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0].size, 64);
    assert_eq!(uploads[0].content_type, "image/png");
    assert_eq!(uploads[0].key.len(), 32);

    let row = &board.tasks()[0];
    assert_eq!(row.image_key(), Some(uploads[0].key.as_str()));
}

#[tokio::test]
async fn test_upload_failure_still_creates_task() {
    let backend = MemoryBackend::new();
    backend.fail_uploads(true);
    let mut board = TaskBoard::new(backend);

    let tasks = assert_ok!(board.create("Receipt", vec![local_png("r.png", 16)]).await);
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].task, "Receipt");
    assert_eq!(tasks[0].image, None);
}

#[tokio::test]
async fn test_remote_image_is_referenced_without_upload() {
    let mut board = TaskBoard::new(MemoryBackend::new());

    let images = vec![PendingImage::Remote {
        key: "existingKey".to_string(),
    }];
    assert_ok!(board.create("Reuse", images).await);

    assert!(board.backend().uploads().is_empty());
    assert_eq!(board.tasks()[0].image_key(), Some("existingKey"));
}

#[tokio::test]
async fn test_blank_label_is_rejected_before_any_call() {
    let mut board = TaskBoard::new(MemoryBackend::new());

    let err = board.create("  \t", vec![local_png("a.png", 16)]).await.unwrap_err();
    assert_eq!(err, BoardError::EmptyLabel);
    assert!(board.backend().rows().is_empty());
    assert!(board.backend().uploads().is_empty());
    assert_eq!(board.backend().list_calls(), 0);
}

#[tokio::test]
async fn test_toggle_flips_only_that_task() {
    let mut board = TaskBoard::new(MemoryBackend::with_rows(vec![
        task(1, "a", false, None),
        task(2, "b", false, None),
        task(3, "c", true, None),
    ]));
    board.refresh().await;

    let tasks = assert_ok!(board.toggle(2).await);
    let flags: Vec<_> = tasks.iter().map(|t| (t.id, t.complete)).collect();
    assert_eq!(flags, vec![(1, false), (2, true), (3, true)]);

    let tasks = assert_ok!(board.toggle(3).await);
    let flags: Vec<_> = tasks.iter().map(|t| (t.id, t.complete)).collect();
    assert_eq!(flags, vec![(1, false), (2, true), (3, false)]);
}

#[tokio::test]
async fn test_delete_removes_exactly_one() {
    let mut board = TaskBoard::new(MemoryBackend::with_rows(vec![
        task(1, "a", false, None),
        task(2, "b", false, None),
        task(3, "c", false, None),
    ]));
    board.refresh().await;

    let ids: Vec<_> = board.delete(2).await.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![1, 3]);
    assert!(board.task(2).is_none());
}

#[tokio::test]
async fn test_every_mutation_refetches() {
    let mut board = TaskBoard::new(MemoryBackend::with_rows(vec![task(1, "a", false, None)]));
    board.refresh().await;
    assert_eq!(board.backend().list_calls(), 1);

    board.set_complete(1, true).await;
    assert_ok!(board.create("b", Vec::new()).await);
    board.delete(1).await;
    assert_eq!(board.backend().list_calls(), 4);
}

#[tokio::test]
async fn test_failed_refresh_keeps_previous_list() {
    let mut board = TaskBoard::new(MemoryBackend::with_rows(vec![task(1, "a", false, None)]));
    board.refresh().await;

    board.backend().fail_lists(true);
    let tasks = board.delete(1).await;
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].id, 1);
    assert!(board.backend().rows().is_empty());
}
