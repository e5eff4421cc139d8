//! Ahlulbayt Heroes entry point
//!
//! The browser build starts through `web::start` (see `lib.rs`). Natively this
//! loads saved progress from disk and prints where the player stands.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use ahlulbayt_heroes::persistence::{FileStorage, MemoryStorage, Storage};
    use ahlulbayt_heroes::{App, platform};

    env_logger::init();
    log::info!("Ahlulbayt Heroes (native) starting...");

    let dir =
        std::env::var("AHLULBAYT_HEROES_DATA").unwrap_or_else(|_| ".ahlulbayt-heroes".into());
    let storage: Box<dyn Storage> = match FileStorage::open(&dir) {
        Ok(storage) => Box::new(storage),
        Err(e) => {
            log::warn!("Cannot use {}: {}; progress will not be kept", dir, e);
            Box::new(MemoryStorage::new())
        }
    };

    let app = App::new(storage, &platform::today(), platform::clock_seed());
    let snap = app.snapshot();

    if std::env::args().any(|a| a == "--json") {
        match serde_json::to_string_pretty(&snap) {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("Failed to serialize snapshot: {}", e),
        }
        return;
    }

    println!(
        "{} Level {} ({} / {} XP), {} gold, title: {}",
        snap.avatar.unwrap_or("?"),
        snap.level,
        snap.xp,
        snap.xp_to_next_level,
        snap.gold,
        snap.title
    );
    println!(
        "Daily challenge: {}",
        if snap.daily_challenge_completed {
            "done"
        } else {
            "available"
        }
    );
    println!(
        "Donations: mosque {}, poor {}, books {}",
        snap.donations.mosque, snap.donations.poor, snap.donations.books
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::start, this is just to satisfy the compiler
}
