use std::fs;

use guttercrypt_core::artifacts::{collect_artifacts, restore_artifacts};
use guttercrypt_core::{build_prompt_context, GutterError, MemoryStore, StoreConfig, VaultStore};
use tempfile::tempdir;

const PASSPHRASE: &str = "test-passphrase-secure-123";

#[test]
fn test_conversation_history_is_bounded() {
    let dir = tempdir().unwrap();
    let store = MemoryStore::new(StoreConfig::new(dir.path()).with_max_conversations(3));

    for i in 1..=8 {
        store
            .add_conversation(&format!("question {}", i), &format!("answer {}", i), PASSPHRASE)
            .expect("append should succeed");
    }

    let memory = store.load(PASSPHRASE).unwrap();
    let questions: Vec<&str> = memory
        .conversations
        .iter()
        .map(|c| c.question.as_str())
        .collect();
    assert_eq!(questions, vec!["question 6", "question 7", "question 8"]);
}

#[test]
fn test_default_bound_is_twenty() {
    let dir = tempdir().unwrap();
    let store = MemoryStore::new(StoreConfig::new(dir.path()));

    for i in 0..21 {
        store
            .add_conversation(&format!("q{}", i), "a", PASSPHRASE)
            .unwrap();
    }

    let memory = store.load(PASSPHRASE).unwrap();
    assert_eq!(memory.conversations.len(), 20);
    assert_eq!(memory.conversations[0].question, "q1");
}

#[test]
fn test_note_removal_persists() {
    let dir = tempdir().unwrap();
    let store = MemoryStore::new(StoreConfig::new(dir.path()));
    for text in ["first", "second", "third"] {
        store.add_note(text, PASSPHRASE).unwrap();
    }

    let removed = store.remove_note(1, PASSPHRASE).unwrap();
    assert_eq!(removed.text, "second");

    let reopened = MemoryStore::new(StoreConfig::new(dir.path()));
    let texts: Vec<String> = reopened
        .notes(PASSPHRASE)
        .unwrap()
        .into_iter()
        .map(|n| n.text)
        .collect();
    assert_eq!(texts, vec!["first", "third"]);
}

#[test]
fn test_invalid_note_index_leaves_storage_unchanged() {
    let dir = tempdir().unwrap();
    let store = MemoryStore::new(StoreConfig::new(dir.path()));
    store.add_note("only", PASSPHRASE).unwrap();
    let before = fs::read(store.config().memory_file()).unwrap();

    let result = store.remove_note(5, PASSPHRASE);
    assert!(matches!(
        result,
        Err(GutterError::IndexOutOfRange { index: 5, len: 1 })
    ));

    let after = fs::read(store.config().memory_file()).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_empty_memory_builds_empty_context() {
    let dir = tempdir().unwrap();
    let store = MemoryStore::new(StoreConfig::new(dir.path()));

    let memory = store.load(PASSPHRASE).unwrap();
    assert_eq!(build_prompt_context(&memory), "");
}

#[test]
fn test_prompt_context_after_activity() {
    let dir = tempdir().unwrap();
    let store = MemoryStore::new(StoreConfig::new(dir.path()));
    store.add_note("staging lives on port 3001", PASSPHRASE).unwrap();
    store
        .add_conversation("where is staging?", "port 3001", PASSPHRASE)
        .unwrap();

    let context = build_prompt_context(&store.load(PASSPHRASE).unwrap());
    assert!(context.contains("1. staging lives on port 3001\n"));
    assert!(context.contains("Q: where is staging?\nA: port 3001\n"));
}

#[test]
fn test_memory_is_independent_of_vault() {
    let dir = tempdir().unwrap();
    let config = StoreConfig::new(dir.path());
    let memory = MemoryStore::new(config.clone());
    memory.add_note("no vault needed", PASSPHRASE).unwrap();

    let vault = VaultStore::new(config);
    assert!(!vault.exists());
    assert_eq!(memory.notes(PASSPHRASE).unwrap().len(), 1);
}

#[test]
fn test_memory_wrong_passphrase() {
    let dir = tempdir().unwrap();
    let store = MemoryStore::new(StoreConfig::new(dir.path()));
    store.add_note("secret", PASSPHRASE).unwrap();

    assert!(matches!(
        store.add_note("other", "wrong-passphrase-456"),
        Err(GutterError::WrongPassphrase)
    ));
    assert_eq!(store.notes(PASSPHRASE).unwrap().len(), 1);
}

#[test]
fn test_non_text_memory_reads_as_wrong_passphrase() {
    let dir = tempdir().unwrap();
    let store = MemoryStore::new(StoreConfig::new(dir.path()));
    store.add_note("secret", PASSPHRASE).unwrap();

    let path = store.config().memory_file();
    let mut raw = fs::read(&path).unwrap();
    raw[3] = 0xFF;
    fs::write(&path, raw).unwrap();

    assert!(matches!(
        store.load(PASSPHRASE),
        Err(GutterError::WrongPassphrase)
    ));
}

#[test]
fn test_synced_memory_survives_transfer() {
    let source_dir = tempdir().unwrap();
    let source = StoreConfig::new(source_dir.path());
    let vault = VaultStore::new(source.clone());
    vault.create().unwrap();
    vault.store(b"TOKEN=abc\n", PASSPHRASE).unwrap();
    MemoryStore::new(source.clone())
        .add_conversation("q", "a", PASSPHRASE)
        .unwrap();

    let bundle = collect_artifacts(&source).unwrap();
    let target_dir = tempdir().unwrap();
    let target = StoreConfig::new(target_dir.path());
    restore_artifacts(&target, &bundle).unwrap();

    assert_eq!(
        fs::read(source.memory_file()).unwrap(),
        fs::read(target.memory_file()).unwrap()
    );
    let restored = MemoryStore::new(target).load(PASSPHRASE).unwrap();
    assert_eq!(restored.conversations[0].answer, "a");
}
