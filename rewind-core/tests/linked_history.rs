use rewind_core::{load_config, History, HistoryConfig, LinkedHistory};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn initial_state() {
    init_tracing();
    let history: LinkedHistory<i32> = LinkedHistory::new();
    assert!(!history.can_redo());
    assert!(!history.can_undo());
    assert_eq!(history.capacity(), 100);
    assert_eq!(history.current_index(), None);
    assert_eq!(history.current_record(), None);

    let history: LinkedHistory<i32> = LinkedHistory::with_capacity(200).unwrap();
    assert!(!history.can_redo());
    assert!(!history.can_undo());
    assert_eq!(history.capacity(), 200);
    assert_eq!(history.current_index(), None);
    assert_eq!(history.current_record(), None);
}

#[test]
fn add_moves_current_and_evicts_oldest() {
    init_tracing();
    let mut history = LinkedHistory::new();
    history.add(0);
    assert_eq!(history.get(0), Some(&0));
    assert!(!history.can_redo());
    assert!(!history.can_undo());
    assert_eq!(history.current_index(), Some(0));
    assert_eq!(history.current_record(), Some(&0));

    history.add(1);
    assert_eq!(history.get(0), Some(&0));
    assert_eq!(history.get(1), Some(&1));
    assert!(!history.can_redo());
    assert!(history.can_undo());
    assert_eq!(history.current_index(), Some(1));
    assert_eq!(history.current_record(), Some(&1));

    for i in 0..100 {
        history.add(i + 2);
    }
    assert_eq!(history.get(0), Some(&2));
    assert!(!history.can_redo());
    assert!(history.can_undo());
    assert_eq!(history.capacity(), 100);
    assert_eq!(history.current_index(), Some(99));
    assert_eq!(history.current_record(), Some(&101));
}

#[test]
fn undo_and_redo() {
    init_tracing();
    let mut history = LinkedHistory::new();
    for i in 0..100 {
        history.add(i);
    }
    for _ in 0..5 {
        history.undo().unwrap();
    }
    assert_eq!(history.current_index(), Some(94));
    assert_eq!(history.current_record(), Some(&94));
    assert!(history.can_undo());
    assert!(history.can_redo());

    history.redo().unwrap();
    assert_eq!(history.current_index(), Some(95));
    assert_eq!(history.current_record(), Some(&95));
}

#[test]
fn size_never_exceeds_capacity() {
    for capacity in 1..=8 {
        let mut history = LinkedHistory::with_capacity(capacity).unwrap();
        for n in 0..20 {
            history.add(n);
            assert!(history.len() <= capacity);
            assert!(!history.can_redo());
        }
        let expected: Vec<i32> = (20 - capacity as i32..20).collect();
        assert_eq!(history.iter().copied().collect::<Vec<_>>(), expected);
    }
}

#[test]
fn undo_then_redo_returns_to_same_position() {
    let mut history = LinkedHistory::with_capacity(6).unwrap();
    for i in 0..6 {
        history.add(i * 10);
    }
    while history.can_undo() {
        let index = history.current_index();
        let record = history.current_record().copied();
        history.undo().unwrap();
        history.redo().unwrap();
        assert_eq!(history.current_index(), index);
        assert_eq!(history.current_record().copied(), record);
        history.undo().unwrap();
    }
    assert_eq!(history.current_index(), Some(0));
    assert!(!history.can_undo());
    assert!(history.can_redo());
}

#[test]
fn config_drives_capacity() {
    let path = std::path::Path::new("target/test_history_config.json");
    std::fs::create_dir_all("target").unwrap();
    std::fs::write(path, r#"{ "initial_capacity": 3 }"#).unwrap();

    let config = load_config(path).unwrap();
    let mut history = LinkedHistory::from_config(&config).unwrap();
    for i in 0..5 {
        history.add(i);
    }
    assert_eq!(history.capacity(), 3);
    assert_eq!(history.get(0), Some(&2));

    let default = LinkedHistory::<i32>::from_config(&HistoryConfig::default()).unwrap();
    assert_eq!(default.capacity(), 100);
}

#[test]
fn missing_config_reports_path() {
    let err = load_config("target/does_not_exist.json").unwrap_err();
    assert!(format!("{err:#}").contains("does_not_exist.json"));
}
