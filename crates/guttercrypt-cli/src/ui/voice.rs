//! KatBot's lines.

use std::path::Path;

use chrono::Utc;

pub fn vault_created() -> String {
    "mrrp. vault created. your secrets have a home now.".to_string()
}

pub fn stored(count: usize) -> String {
    format!(
        "swallowed {} secret{} into the vault. encrypted. sealed. mine.",
        count,
        plural(count)
    )
}

pub fn stored_text() -> String {
    "text swallowed whole. encrypted. sealed. mine.".to_string()
}

pub fn injected(file: &Path) -> String {
    format!(
        "secrets injected into {}. handle with care, meatbag.",
        file.display()
    )
}

pub fn list_header() -> String {
    "here's what's in the vault (keys only, i'm not stupid):".to_string()
}

pub fn list_raw_text() -> String {
    "vault holds raw text. no keys to show, and i'm not reading it to you.".to_string()
}

pub fn list_empty() -> String {
    "vault is empty. nothing to see here. feed me secrets.".to_string()
}

pub fn locked(file: &Path) -> String {
    format!(
        "vault sealed. {} deleted. your secrets are underground now.",
        file.display()
    )
}

pub fn lock_missing(file: &Path) -> String {
    format!(
        "'{}' doesn't exist. nothing to lock. maybe it's already sealed?",
        file.display()
    )
}

pub fn unlocked(file: &Path) -> String {
    format!(
        "vault cracked open. {} restored. don't do anything dumb with it.",
        file.display()
    )
}

pub fn nuke_confirm(phrase: &str) -> String {
    format!(
        "you sure? this is scorched earth. type '{}' to confirm.",
        phrase
    )
}

pub fn nuked() -> String {
    "vault obliterated. nothing remains. meow.".to_string()
}

pub fn nuke_cancelled() -> String {
    "smart choice. vault lives another day.".to_string()
}

pub fn note_added(total: usize) -> String {
    format!(
        "noted. i'll remember that. ({} note{} total)",
        total,
        plural(total)
    )
}

pub fn note_removed(text: &str) -> String {
    format!("forgot \"{}\". already can't remember what it was.", text)
}

pub fn notes_empty() -> String {
    "no notes. your head is as empty as this list.".to_string()
}

pub fn thinking() -> String {
    "*thinking*...".to_string()
}

pub fn memory_not_saved(reason: &str) -> String {
    format!("couldn't write that one down: {}", reason)
}

pub fn passphrase_prompt() -> &'static str {
    "passphrase (don't forget it, i won't help you)"
}

pub fn passphrase_confirm() -> &'static str {
    "confirm passphrase"
}

pub fn passphrase_mismatch() -> &'static str {
    "passphrases don't match. try again, butterfingers."
}

pub fn pushed(created: bool, url: &str) -> String {
    if created {
        format!("new secret gist created. vault shipped to {}", url)
    } else {
        format!("vault shipped to {}", url)
    }
}

pub fn pulled(files: &[&str]) -> String {
    if files.is_empty() {
        "gist had nothing i recognise. nothing changed.".to_string()
    } else {
        format!("pulled {} from the gist. your local copy got overwritten.", files.join(", "))
    }
}

pub fn linked(gist_id: &str) -> String {
    format!("linked gist {}. push and pull away.", gist_id)
}

const MEOWS: [&str; 6] = [
    "mrrrrrrp.",
    "*knocks your secrets off the table* meow.",
    "pspspsps? ...no. i call the shots here.",
    "meow. now encrypt something, i'm bored.",
    "*hisses at plaintext* disgusting.",
    "you came here just for this? ...respect.",
];

pub const CAT: &str = r"
      /\_/\
     ( o.o )
      > ^ <
     /|   |\
    (_|   |_)
";

/// A random meow.
pub fn meow() -> &'static str {
    let pick = Utc::now().timestamp_subsec_nanos() as usize % MEOWS.len();
    MEOWS[pick]
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}
