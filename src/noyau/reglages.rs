// src/noyau/reglages.rs
//
// Instantané de réglages, en lecture seule pour la durée d'un appel.
// La persistance (config.ini & co) appartient à l'application hôte ;
// le moteur ne relit jamais un réglage en cours de calcul.

/// Réglages visibles par le moteur.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reglages {
    /// Nombre de décimales affichées en mode point fixe.
    pub decimales: u32,
    /// Affichage fractionnaire (1/2, -1 1/2…) au lieu du point fixe.
    pub fractions: bool,
    /// Autorise le raccourci "A+=B" (aperçu d'opération).
    pub affectation_composee: bool,
}

impl Default for Reglages {
    fn default() -> Self {
        // 2 décimales est le minimum imposé côté application.
        Reglages {
            decimales: 2,
            fractions: false,
            affectation_composee: false,
        }
    }
}
