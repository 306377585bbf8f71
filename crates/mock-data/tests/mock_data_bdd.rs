//! Behavioural tests for the mock-data crate.
//!
//! These tests validate dataset loading and record generation against the
//! Gherkin scenarios in `tests/features/mock_data.feature`.

// `expect` is idiomatic in test code for failing fast on precondition violations.
#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use chrono::NaiveDate;
use mock_data::{
    DatasetError, MockDataset, MockTeachingRecord, RecordGenerationRequest,
    generate_teaching_records,
};
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::{ScenarioState, given, scenario, then, when};

const BUNDLED_JSON: &str = include_str!("../fixtures/dataset.json");

const UNKNOWN_SUBJECT_JSON: &str = r#"{
    "version": 1,
    "users": [{"id": "1", "email": "a@example.com", "password": "pw", "name": "A"}],
    "subjects": [{"id": "sub1", "name": "Mathematics"}],
    "teachingRecords": [{
        "id": "rec1", "userId": "1", "date": "2024-07-15", "period": 1,
        "subjectId": "sub7", "subjectName": "Music", "description": "Scales"
    }]
}"#;

/// Test world holding parsed datasets and generated records.
#[derive(Default, ScenarioState)]
struct World {
    json_input: Slot<String>,
    dataset_result: Slot<Result<MockDataset, DatasetError>>,
    request: Slot<RecordGenerationRequest>,
    generated: Slot<Vec<MockTeachingRecord>>,
    second_generation: Slot<Vec<MockTeachingRecord>>,
}

impl World {
    fn dataset(&self) -> MockDataset {
        self.dataset_result
            .get()
            .expect("dataset should be set")
            .expect("dataset should be valid")
    }

    fn request(&self) -> RecordGenerationRequest {
        self.request.get().expect("request should be set")
    }
}

#[fixture]
fn world() -> World {
    World::default()
}

#[given("the bundled dataset JSON")]
fn the_bundled_dataset_json(world: &World) {
    world.json_input.set(BUNDLED_JSON.to_owned());
}

#[given("dataset JSON with a record for an unknown subject")]
fn dataset_json_with_unknown_subject(world: &World) {
    world.json_input.set(UNKNOWN_SUBJECT_JSON.to_owned());
}

#[given("the bundled dataset")]
fn the_bundled_dataset(world: &World) {
    world.dataset_result.set(MockDataset::bundled());
}

#[given("a generation request with seed {seed:u64} for user {user_id}")]
fn a_generation_request(world: &World, seed: u64, user_id: String) {
    world.request.set(RecordGenerationRequest {
        seed,
        user_id,
        count: 12,
        end_date: NaiveDate::from_ymd_opt(2024, 7, 31).expect("valid date"),
        span_days: 31,
        max_period: 8,
    });
}

#[when("the dataset is parsed")]
fn the_dataset_is_parsed(world: &World) {
    let json = world.json_input.get().expect("JSON input should be set");
    world.dataset_result.set(MockDataset::from_json(&json));
}

#[when("records are generated")]
fn records_are_generated(world: &World) {
    let records =
        generate_teaching_records(&world.dataset(), &world.request()).expect("generation");
    world.generated.set(records);
}

#[when("records are generated twice")]
fn records_are_generated_twice(world: &World) {
    let dataset = world.dataset();
    let request = world.request();
    let first = generate_teaching_records(&dataset, &request).expect("first generation");
    let second = generate_teaching_records(&dataset, &request).expect("second generation");
    world.generated.set(first);
    world.second_generation.set(second);
}

#[then("parsing succeeds")]
fn parsing_succeeds(world: &World) {
    let result = world.dataset_result.get().expect("result should be set");
    assert!(result.is_ok(), "Expected parsing to succeed: {result:?}");
}

#[then("the dataset has {count} subjects")]
fn the_dataset_has_subjects(world: &World, count: usize) {
    assert_eq!(world.dataset().subjects().len(), count);
}

#[then("parsing fails with an unknown subject error")]
fn parsing_fails_with_unknown_subject(world: &World) {
    let result = world.dataset_result.get().expect("result should be set");
    assert!(
        matches!(result, Err(DatasetError::UnknownSubject { .. })),
        "Expected unknown subject error: {result:?}"
    );
}

#[then("both generations are identical")]
fn both_generations_are_identical(world: &World) {
    let first = world.generated.get().expect("first generation");
    let second = world.second_generation.get().expect("second generation");
    assert_eq!(first, second);
}

#[then("every generated record belongs to user {user_id}")]
fn every_record_belongs_to(world: &World, user_id: String) {
    let records = world.generated.get().expect("records should be generated");
    assert!(!records.is_empty());
    assert!(records.iter().all(|record| record.user_id == user_id));
}

#[scenario(path = "tests/features/mock_data.feature", name = "Bundled dataset loads")]
fn bundled_dataset_loads(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/mock_data.feature",
    name = "Records referencing unknown subjects are rejected"
)]
fn records_referencing_unknown_subjects_are_rejected(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/mock_data.feature",
    name = "Generation is deterministic"
)]
fn generation_is_deterministic(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/mock_data.feature",
    name = "Generated records belong to the requested user"
)]
fn generated_records_belong_to_the_requested_user(world: World) {
    let _ = world;
}
