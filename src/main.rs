// src/main.rs
//
// Boucle interactive minimale autour du moteur : une ligne = un problème.
// L'interface graphique vit dans l'application hôte ; ce binaire sert aux
// essais manuels et aux traces (RUST_LOG-like via --debug).

use std::io::{self, BufRead, Write};

use log::LevelFilter;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use calculatrice_solveur::{calculer, Reglages, ScienceStd};

fn main() {
    let niveau = if std::env::args().any(|a| a == "--debug") {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let _ = TermLogger::init(
        niveau,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    );

    let reglages = Reglages::default();
    let science = ScienceStd::default();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("Entrez le problème : ");
        let _ = stdout.flush();

        let mut ligne = String::new();
        match stdin.lock().read_line(&mut ligne) {
            Ok(0) | Err(_) => break, // EOF
            Ok(_) => {}
        }

        let probleme = ligne.trim();
        if probleme.is_empty() {
            continue;
        }

        match calculer(probleme, &reglages, &science) {
            Ok(resultat) => println!("{resultat}"),
            Err(e) => {
                let equation = e.equation.as_deref().unwrap_or(probleme);
                eprintln!("!!ERREUR!! {e} ({equation})");
            }
        }
    }
}
