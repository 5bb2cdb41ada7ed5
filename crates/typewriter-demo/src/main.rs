#![forbid(unsafe_code)]

//! Typewriter demo binary entry point.

use std::process;
use std::time::Duration;

use typewriter_core::MotionPreference;
use typewriter_core::config::EnvOverrides;
use typewriter_demo::app::{self, App};
use typewriter_demo::{cli, logging, showcase};

fn main() {
    let opts = cli::Opts::parse();

    if let Err(e) = logging::init_from_env() {
        eprintln!("Failed to open {}: {e}", logging::LOG_ENV);
    }

    let entries = match opts.spec.as_deref() {
        Some(path) => showcase::load(path),
        None => showcase::builtin(),
    };
    let entries = match entries {
        Ok(entries) => entries,
        Err(e) => {
            eprintln!("Failed to load spec: {e}");
            process::exit(1);
        }
    };

    if opts.list {
        for (i, entry) in entries.iter().enumerate() {
            let texts = entry.options().texts;
            let texts: Vec<&str> = texts.iter().collect();
            println!(
                "{:>2}. {} [{}] {}",
                i + 1,
                entry.title,
                entry.spec.variant(),
                texts.join(" | ")
            );
        }
        return;
    }

    let env = EnvOverrides::from_env_with_diagnostics();
    for error in &env.errors {
        eprintln!("Ignoring environment override {error}");
    }
    // The reduced-motion variable feeds the toggleable system preference
    // instead of pinning every block.
    let overrides = EnvOverrides {
        reduce_motion: None,
        ..env.overrides
    };

    let motion = MotionPreference::from_env();
    if opts.reduced_motion {
        motion.set(true);
    }

    let exit_after = (opts.exit_after_ms > 0).then(|| Duration::from_millis(opts.exit_after_ms));
    let result =
        App::new(entries, &overrides, motion).and_then(|mut app| app::run(&mut app, exit_after));
    if let Err(e) = result {
        eprintln!("Runtime error: {e}");
        process::exit(1);
    }
}
