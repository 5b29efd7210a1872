use std::fs;

use tempfile::TempDir;

use quests::app::App;
use quests::config::Config;
use quests::error::QuestsError;
use quests::guard::InstanceGuard;
use quests::quest::Quest;
use quests::storage::{SaveData, Storage};

fn storage_in(dir: &TempDir) -> Storage {
    Storage::new(
        dir.path().join("quests.json"),
        dir.path().join("legacy_quests.json"),
    )
}

fn app_in(dir: &TempDir) -> App {
    App::new(storage_in(dir)).unwrap()
}

fn fill_form(app: &mut App, name: &str, difficulty: &str, exp: &str, coins: &str, desc: &str) {
    app.form.name = name.to_string();
    app.form.difficulty = difficulty.to_string();
    app.form.exp_reward = exp.to_string();
    app.form.coin_reward = coins.to_string();
    app.form.description = desc.to_string();
}

// --- controller --------------------------------------------------------

#[tokio::test]
async fn create_quest_appends_in_order_and_clears_form() {
    let dir = TempDir::new().unwrap();
    let mut app = app_in(&dir);

    fill_form(&mut app, "Lavar a louça", "3", "50", "20", "pia cheia");
    app.create_quest().unwrap();
    fill_form(&mut app, "Estudar", "7", "120", "40", "");
    app.create_quest().unwrap();

    let names: Vec<&str> = app.quests.iter().map(|q| q.name.as_str()).collect();
    assert_eq!(names, ["Lavar a louça", "Estudar"]);
    assert!(app.quests.iter().all(|q| !q.completed));

    // The form resets after a successful create, difficulty back to "0".
    assert_eq!(app.form.name, "");
    assert_eq!(app.form.difficulty, "0");
    assert_eq!(app.form.exp_reward, "");
}

#[tokio::test]
async fn create_quest_rejects_empty_name() {
    let dir = TempDir::new().unwrap();
    let mut app = app_in(&dir);

    fill_form(&mut app, "", "2", "10", "5", "");
    let err = app.create_quest().unwrap_err();
    assert!(matches!(err, QuestsError::EmptyQuestName));
    assert!(app.quests.is_empty());
}

#[tokio::test]
async fn create_quest_rejects_non_numeric_fields() {
    let dir = TempDir::new().unwrap();
    let mut app = app_in(&dir);

    fill_form(&mut app, "Correr", "2", "dez", "5", "");
    let err = app.create_quest().unwrap_err();
    assert!(matches!(err, QuestsError::InvalidNumericInput));
    assert!(app.quests.is_empty());

    // The numeric check fires before the name check.
    fill_form(&mut app, "", "2", "x", "5", "");
    let err = app.create_quest().unwrap_err();
    assert!(matches!(err, QuestsError::InvalidNumericInput));
}

#[tokio::test]
async fn completing_grants_rewards_and_moves_to_history() {
    let dir = TempDir::new().unwrap();
    let mut app = app_in(&dir);

    fill_form(&mut app, "Ler um livro", "5", "50", "20", "");
    app.create_quest().unwrap();

    let (exp, coins) = app.complete_quest("Ler um livro").unwrap();
    assert_eq!((exp, coins), (50, 20));
    assert_eq!(app.player.total_exp, 50);
    assert_eq!(app.player.total_coins, 20);

    assert!(app.active_quests().is_empty());
    let history = app.completed_quests();
    assert_eq!(history.len(), 1);
    assert!(history[0].completed);
}

#[tokio::test]
async fn completing_picks_first_active_match_on_name_collision() {
    let dir = TempDir::new().unwrap();
    let mut app = app_in(&dir);

    fill_form(&mut app, "Treinar", "1", "10", "1", "primeira");
    app.create_quest().unwrap();
    fill_form(&mut app, "Treinar", "9", "99", "9", "segunda");
    app.create_quest().unwrap();

    let (exp, _) = app.complete_quest("Treinar").unwrap();
    assert_eq!(exp, 10);
    assert!(app.quests[0].completed);
    assert!(!app.quests[1].completed);
}

#[tokio::test]
async fn completing_an_unknown_quest_is_a_selection_error() {
    let dir = TempDir::new().unwrap();
    let mut app = app_in(&dir);

    let err = app.complete_quest("inexistente").unwrap_err();
    assert!(matches!(err, QuestsError::NoActiveQuestToComplete));
    assert_eq!(app.player.total_exp, 0);
}

#[tokio::test]
async fn delete_removes_only_first_active_match() {
    let dir = TempDir::new().unwrap();
    let mut app = app_in(&dir);

    fill_form(&mut app, "Arrumar", "1", "10", "1", "primeira");
    app.create_quest().unwrap();
    fill_form(&mut app, "Arrumar", "2", "20", "2", "segunda");
    app.create_quest().unwrap();

    app.delete_quest("Arrumar").unwrap();
    assert_eq!(app.quests.len(), 1);
    assert_eq!(app.quests[0].description, "segunda");
}

#[tokio::test]
async fn completed_quests_cannot_be_deleted() {
    let dir = TempDir::new().unwrap();
    let mut app = app_in(&dir);

    fill_form(&mut app, "Cozinhar", "4", "30", "10", "");
    app.create_quest().unwrap();
    app.complete_quest("Cozinhar").unwrap();

    let err = app.delete_quest("Cozinhar").unwrap_err();
    assert!(matches!(err, QuestsError::NoActiveQuestToDelete));
    assert_eq!(app.quests.len(), 1);

    // A same-named active quest is removed without touching the completed one.
    fill_form(&mut app, "Cozinhar", "4", "30", "10", "de novo");
    app.create_quest().unwrap();
    app.delete_quest("Cozinhar").unwrap();
    assert_eq!(app.quests.len(), 1);
    assert!(app.quests[0].completed);
}

#[tokio::test]
async fn negative_rewards_are_accepted_and_subtract() {
    // Reward fields are deliberately unvalidated; a negative reward moves
    // the totals down.
    let dir = TempDir::new().unwrap();
    let mut app = app_in(&dir);

    fill_form(&mut app, "Penalidade", "0", "-50", "-20", "");
    app.create_quest().unwrap();
    app.complete_quest("Penalidade").unwrap();

    assert_eq!(app.player.total_exp, -50);
    assert_eq!(app.player.total_coins, -20);
    assert_eq!(app.player.level(), -1);
}

#[tokio::test]
async fn apply_settings_persists_immediately() {
    let dir = TempDir::new().unwrap();
    let mut app = app_in(&dir);

    app.apply_settings(true, 14).unwrap();

    let on_disk = storage_in(&dir).load().unwrap();
    assert!(on_disk.config.dark_theme);
    assert_eq!(on_disk.config.font_size, 14);
}

#[tokio::test]
async fn update_annotations_persists_immediately() {
    let dir = TempDir::new().unwrap();
    let mut app = app_in(&dir);

    app.update_annotations("comprar café\nligar para o dentista".to_string())
        .unwrap();

    let on_disk = storage_in(&dir).load().unwrap();
    assert_eq!(on_disk.config.annotations, "comprar café\nligar para o dentista");
}

#[tokio::test]
async fn save_then_load_round_trips_full_state() {
    let dir = TempDir::new().unwrap();
    let mut app = app_in(&dir);

    fill_form(&mut app, "Primeira", "3", "100", "30", "descrição");
    app.create_quest().unwrap();
    fill_form(&mut app, "Segunda", "8", "250", "80", "");
    app.create_quest().unwrap();
    app.complete_quest("Primeira").unwrap();
    app.config.annotations = "notas".to_string();
    app.save().unwrap();

    let loaded = storage_in(&dir).load().unwrap();
    assert_eq!(loaded.exp, 100);
    assert_eq!(loaded.coins, 30);
    assert_eq!(loaded.config.annotations, "notas");
    assert_eq!(loaded.quests.len(), 2);
    assert_eq!(loaded.quests[0].name, "Primeira");
    assert!(loaded.quests[0].completed);
    assert_eq!(loaded.quests[1].name, "Segunda");
    assert!(!loaded.quests[1].completed);
    assert_eq!(loaded.quests, app.quests);
}

// --- storage -----------------------------------------------------------

#[test]
fn load_returns_defaults_when_file_missing() {
    let dir = TempDir::new().unwrap();
    let data = storage_in(&dir).load().unwrap();
    assert_eq!(data, SaveData::default());
    assert_eq!(data.config, Config::default());
    assert_eq!(data.config.font_size, 10);
}

#[test]
fn load_migrates_legacy_file_into_canonical_path() {
    let dir = TempDir::new().unwrap();
    let legacy = dir.path().join("legacy_quests.json");
    fs::write(
        &legacy,
        r#"{"exp": 42, "coins": 7, "config": {"dark_theme": true, "font_size": 12, "annotations": ""}, "quests": []}"#,
    )
    .unwrap();

    let storage = storage_in(&dir);
    let data = storage.load().unwrap();
    assert_eq!(data.exp, 42);
    assert_eq!(data.coins, 7);
    assert!(data.config.dark_theme);
    assert!(dir.path().join("quests.json").exists());

    // The canonical copy wins from now on.
    fs::remove_file(&legacy).unwrap();
    assert_eq!(storage.load().unwrap().exp, 42);
}

#[test]
fn load_fails_on_malformed_json() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("quests.json"), "{not json").unwrap();
    assert!(storage_in(&dir).load().is_err());
}

#[test]
fn quest_subfields_default_when_missing() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("quests.json"),
        r#"{"quests": [{"name": "Antiga", "difficulty": 2, "exp_reward": 10, "coin_reward": 5}]}"#,
    )
    .unwrap();

    let data = storage_in(&dir).load().unwrap();
    assert_eq!(data.exp, 0);
    assert_eq!(data.quests.len(), 1);
    assert_eq!(data.quests[0].description, "");
    assert!(!data.quests[0].completed);
}

#[test]
fn quest_missing_name_is_a_load_error() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("quests.json"),
        r#"{"quests": [{"difficulty": 2, "exp_reward": 10, "coin_reward": 5}]}"#,
    )
    .unwrap();
    assert!(storage_in(&dir).load().is_err());
}

#[test]
fn save_writes_the_documented_shape() {
    let dir = TempDir::new().unwrap();
    let storage = storage_in(&dir);
    storage
        .save(&SaveData {
            exp: 1,
            coins: 2,
            config: Config::default(),
            quests: vec![Quest::new("Q".to_string(), 3, 4, 5, "d".to_string())],
        })
        .unwrap();

    let raw = fs::read_to_string(dir.path().join("quests.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["exp"], 1);
    assert_eq!(value["coins"], 2);
    assert_eq!(value["config"]["font_size"], 10);
    assert_eq!(value["quests"][0]["name"], "Q");
    assert_eq!(value["quests"][0]["completed"], false);
    // Pretty-printed, one field per line.
    assert!(raw.contains('\n'));
}

// --- single-instance guard ---------------------------------------------

#[test]
fn guard_blocks_second_instance_while_pid_is_alive() {
    let dir = TempDir::new().unwrap();
    let lock = dir.path().join("app.lock");
    fs::write(&lock, std::process::id().to_string()).unwrap();

    assert!(InstanceGuard::acquire(&lock).unwrap().is_none());
    // The live lock is left untouched.
    assert_eq!(
        fs::read_to_string(&lock).unwrap(),
        std::process::id().to_string()
    );
}

#[test]
fn guard_replaces_stale_lock_from_dead_process() {
    let dir = TempDir::new().unwrap();
    let lock = dir.path().join("app.lock");

    // A child that has already been reaped leaves a dead pid behind.
    let mut child = std::process::Command::new("true").spawn().unwrap();
    let dead_pid = child.id();
    child.wait().unwrap();
    fs::write(&lock, dead_pid.to_string()).unwrap();

    let guard = InstanceGuard::acquire(&lock).unwrap();
    assert!(guard.is_some());
    assert_eq!(
        fs::read_to_string(&lock).unwrap(),
        std::process::id().to_string()
    );
}

#[test]
fn guard_treats_unreadable_lock_as_stale() {
    let dir = TempDir::new().unwrap();
    let lock = dir.path().join("app.lock");
    fs::write(&lock, "garbage").unwrap();

    assert!(InstanceGuard::acquire(&lock).unwrap().is_some());
}

#[test]
fn guard_removes_lock_file_on_drop() {
    let dir = TempDir::new().unwrap();
    let lock = dir.path().join("app.lock");

    let guard = InstanceGuard::acquire(&lock).unwrap().unwrap();
    assert!(lock.exists());
    drop(guard);
    assert!(!lock.exists());
}
