// ABOUTME: Integration tests for on-disk plan and profile persistence
// ABOUTME: Uses temporary directories to verify save, load, replace and clear
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{fenced_plan, sample_profile, BARE_PLAN};
use fitplan_server::errors::ErrorCode;
use fitplan_server::plan::parse_plan;
use fitplan_server::storage::PlanStore;
use tempfile::TempDir;

fn store() -> (TempDir, PlanStore) {
    common::init_test_logging();
    let dir = TempDir::new().unwrap();
    let store = PlanStore::new(dir.path().join("fitplan"));
    (dir, store)
}

#[tokio::test]
async fn test_empty_store_has_nothing() {
    let (_dir, store) = store();

    assert_eq!(store.load_plan().await.unwrap(), None);
    assert_eq!(store.load_profile().await.unwrap(), None);
    assert!(!store.clear_plan().await.unwrap());
}

#[tokio::test]
async fn test_plan_and_profile_survive_reload() {
    let (_dir, store) = store();
    let plan = parse_plan(&fenced_plan()).unwrap();
    let profile = sample_profile();

    store.save_plan(&plan).await.unwrap();
    store.save_profile(&profile).await.unwrap();

    let reopened = PlanStore::new(store.root());
    assert_eq!(reopened.load_plan().await.unwrap(), Some(plan));
    assert_eq!(reopened.load_profile().await.unwrap(), Some(profile));
}

#[tokio::test]
async fn test_saving_replaces_previous_plan() {
    let (_dir, store) = store();
    let first = parse_plan(BARE_PLAN).unwrap();
    let second = parse_plan(
        r#"{"workout": {"dailyRoutines": []}, "diet": {"meals": {"dinner": "Soup"}}}"#,
    )
    .unwrap();

    store.save_plan(&first).await.unwrap();
    store.save_plan(&second).await.unwrap();

    assert_eq!(store.load_plan().await.unwrap(), Some(second));
    let leftovers: Vec<_> = std::fs::read_dir(store.root())
        .unwrap()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty());
}

#[tokio::test]
async fn test_clear_removes_only_the_plan() {
    let (_dir, store) = store();
    store.save_plan(&parse_plan(BARE_PLAN).unwrap()).await.unwrap();
    store.save_profile(&sample_profile()).await.unwrap();

    assert!(store.clear_plan().await.unwrap());
    assert_eq!(store.load_plan().await.unwrap(), None);
    assert!(store.load_profile().await.unwrap().is_some());
}

#[tokio::test]
async fn test_corrupt_plan_record_is_a_serialization_error() {
    let (_dir, store) = store();
    std::fs::create_dir_all(store.root()).unwrap();
    std::fs::write(store.root().join("fitness_plan.json"), r#"{"tips": []}"#).unwrap();

    let err = store.load_plan().await.unwrap_err();
    assert_eq!(err.code, ErrorCode::SerializationError);
}
