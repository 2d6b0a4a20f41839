//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - invariants : jamais de panique ; un succès commence par "= ", "≈ "
//!   ou "x " ; un échec porte un code connu de la table (3720 exclu :
//!   ce code signalerait une incohérence interne)

use std::time::{Duration, Instant};

use super::moteur::calculer;
use super::reglages::Reglages;
use super::science::ScienceStd;

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé : {:?}", max);
    }
}

/* ------------------------ Invariants ------------------------ */

const CODES_CONNUS: &[u16] = &[
    2000, 2002, 2003, 2007, 3002, 3003, 3005, 3006, 3007, 3008, 3009, 3010, 3012, 3022, 3023,
    3025, 3026, 3027, 3028, 3029, 3030, 3218,
];

fn verifier(expr: &str, reglages: &Reglages) {
    match calculer(expr, reglages, &ScienceStd::default()) {
        Ok(r) => {
            assert!(
                r.starts_with("= ") || r.starts_with("≈ ") || r.starts_with("x "),
                "forme de sortie inattendue : expr={expr:?} sortie={r:?}"
            );
        }
        Err(e) => {
            assert!(
                CODES_CONNUS.contains(&e.code),
                "code d'erreur inconnu : expr={expr:?} erreur={e}"
            );
            assert_eq!(
                e.equation.as_deref(),
                Some(expr),
                "équation non attachée : expr={expr:?}"
            );
        }
    }
}

/* ------------------------ Génération d'expressions (bornée) ------------------------ */

fn gen_atome(rng: &mut Rng, avec_variable: bool) -> String {
    match rng.pick(if avec_variable { 6 } else { 5 }) {
        0 => format!("{}", rng.pick(10)),
        1 => format!("{}.{}", rng.pick(10), rng.pick(100)),
        2 => format!("{}/{}", rng.pick(9) + 1, rng.pick(9) + 1),
        3 => "π".to_string(),
        4 => format!("√({})", rng.pick(50)),
        _ => "x".to_string(),
    }
}

fn gen_expr(rng: &mut Rng, depth: usize, avec_variable: bool) -> String {
    if depth == 0 {
        return gen_atome(rng, avec_variable);
    }

    match rng.pick(8) {
        0 => gen_atome(rng, avec_variable),
        1 => format!(
            "({}+{})",
            gen_expr(rng, depth - 1, avec_variable),
            gen_expr(rng, depth - 1, avec_variable)
        ),
        2 => format!(
            "({}-{})",
            gen_expr(rng, depth - 1, avec_variable),
            gen_expr(rng, depth - 1, avec_variable)
        ),
        3 => format!(
            "({}*{})",
            gen_expr(rng, depth - 1, avec_variable),
            gen_expr(rng, depth - 1, avec_variable)
        ),
        4 => format!(
            "({}/{})",
            gen_expr(rng, depth - 1, avec_variable),
            gen_expr(rng, depth - 1, avec_variable)
        ),
        5 => format!("({}^{})", gen_expr(rng, depth - 1, false), rng.pick(6)),
        6 => format!("sin({})", gen_expr(rng, depth - 1, false)),
        _ => format!("-{}", gen_expr(rng, depth - 1, avec_variable)),
    }
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_expressions_numeriques() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    // Même seed => mêmes expressions => mêmes sorties (déterminisme)
    let mut rng = Rng::new(0xC0FFEE_u64);
    let reglages = Reglages::default();

    let mut vus_ok = 0usize;
    let mut vus_err = 0usize;

    for _ in 0..150 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 4, false);
        match calculer(&expr, &reglages, &ScienceStd::default()) {
            Ok(_) => vus_ok += 1,
            Err(_) => vus_err += 1,
        }
        verifier(&expr, &reglages);
    }

    // On veut voir une majorité de succès, sinon le fuzz ne balaye rien.
    assert!(vus_ok > 50, "trop peu de succès : {vus_ok}");
    let _ = vus_err;
}

#[test]
fn fuzz_safe_equations() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(0xBADC0DE_u64);
    let reglages = Reglages::default();

    for _ in 0..120 {
        budget(t0, max);

        let gauche = gen_expr(&mut rng, 3, true);
        let variable_a_droite = rng.coin();
        let droite = gen_expr(&mut rng, 3, variable_a_droite);
        let expr = format!("{gauche}={droite}");
        verifier(&expr, &reglages);
    }
}

#[test]
fn fuzz_safe_mode_fractions() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(0xFEED_u64);
    let reglages = Reglages {
        fractions: true,
        ..Reglages::default()
    };

    for _ in 0..100 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 4, false);
        verifier(&expr, &reglages);
    }
}

#[test]
fn fuzz_safe_entrees_brutes() {
    // Saisies dégénérées : aucune ne doit paniquer.
    let reglages = Reglages::default();
    let entrees = [
        "", " ", ".", "..", "(", ")", "()", "=", "==", "≈", "+", "-", "*", "/", "^", ",",
        "((((", "))))", "1..2", "1.2.3", "5//2", "2**3", "x=", "=x", "xyz", ")(", "π π",
        "√", "sin", "sin()", "log(,)", "e^", "5+", "+5", "--5", "5=5=5",
    ];

    for entree in entrees {
        match calculer(entree, &reglages, &ScienceStd::default()) {
            Ok(r) => assert!(
                r.starts_with("= ") || r.starts_with("≈ ") || r.starts_with("x "),
                "forme de sortie inattendue pour {entree:?} : {r:?}"
            ),
            Err(e) => assert!(
                CODES_CONNUS.contains(&e.code),
                "code inconnu pour {entree:?} : {e}"
            ),
        }
    }
}

#[test]
fn fuzz_safe_somme_longue() {
    // Somme plate de 400 termes : pas d'explosion de pile côté analyse
    // (associativité gauche => la boucle de `somme` reste itérative).
    let expr = vec!["1/2"; 400].join("+");
    let r = calculer(&expr, &Reglages::default(), &ScienceStd::default()).unwrap();
    assert_eq!(r, "= 200");
}
