use std::cmp::Ordering;

use uuid::Uuid;

/// Smallest score gap treated as a decisive cutoff point.
pub const BRECHA_MINIMA: f64 = 0.05;
/// A single top result above this score stands on its own.
pub const RELEVANCIA_TOP: f64 = 0.7;
/// Fallback floor when no decisive gap exists.
pub const RELEVANCIA_MINIMA: f64 = 0.65;
/// Gap analysis never looks past this many leading results.
const LIMITE_BRECHAS: usize = 5;

/// Scored candidate, ephemeral to one search request.
#[derive(Debug, Clone)]
pub struct Candidato {
    pub documento_id: Uuid,
    pub titulo: String,
    pub descripcion: String,
    pub relevancia: f64,
}

/// Descending by score; stable, so ties keep enumeration order.
pub fn ordenar_por_relevancia(candidatos: &mut [Candidato]) {
    candidatos.sort_by(|a, b| {
        b.relevancia
            .partial_cmp(&a.relevancia)
            .unwrap_or(Ordering::Equal)
    });
}

/// Adaptive cutoff over scores sorted descending: returns how many leading
/// candidates to keep.
///
/// Looks for the largest gap between adjacent scores among the first
/// `min(5, max(2, 0.3*N))` positions. A gap of at least [`BRECHA_MINIMA`]
/// cuts right before it; otherwise a lone strong top result (>
/// [`RELEVANCIA_TOP`]) survives alone, or everything above
/// [`RELEVANCIA_MINIMA`] does.
pub fn corte_adaptativo(relevancias: &[f64]) -> usize {
    let n = relevancias.len();
    if n < 2 {
        return n;
    }

    let limite = usize::min(LIMITE_BRECHAS, usize::max(2, (n as f64 * 0.3) as usize));

    let mut mejor_indice = 0;
    let mut mejor_brecha = f64::NEG_INFINITY;
    for i in 1..=usize::min(limite, n - 1) {
        let brecha = relevancias[i - 1] - relevancias[i];
        if brecha > mejor_brecha {
            mejor_brecha = brecha;
            mejor_indice = i;
        }
    }

    if mejor_brecha >= BRECHA_MINIMA {
        return mejor_indice;
    }
    if relevancias[0] > RELEVANCIA_TOP {
        return 1;
    }
    relevancias.iter().filter(|&&r| r > RELEVANCIA_MINIMA).count()
}

/// Manual cutoff: strictly greater than the threshold, so a threshold equal
/// to a score excludes that score.
pub fn aplicar_umbral_manual(relevancias: &[f64], umbral: f64) -> usize {
    relevancias.iter().filter(|&&r| r > umbral).count()
}

/// Description fragment of at most 100 characters, with a "..." suffix when
/// truncated.
pub fn fragmento(descripcion: &str) -> String {
    if descripcion.chars().count() > 100 {
        let corto: String = descripcion.chars().take(100).collect();
        format!("{corto}...")
    } else {
        descripcion.to_string()
    }
}

pub fn redondear2(valor: f64) -> f64 {
    (valor * 100.0).round() / 100.0
}

pub fn redondear3(valor: f64) -> f64 {
    (valor * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brecha_decisiva_corta_antes_de_la_caida() {
        // largest examined gap is 0.35 between positions 1 and 2
        let corte = corte_adaptativo(&[0.9, 0.85, 0.5, 0.4, 0.3]);
        assert_eq!(corte, 2);
    }

    #[test]
    fn sin_brecha_decisiva_y_top_fuerte_queda_solo_el_primero() {
        let corte = corte_adaptativo(&[0.72, 0.71, 0.70, 0.69]);
        assert_eq!(corte, 1);
    }

    #[test]
    fn sin_brecha_decisiva_aplica_piso_de_relevancia() {
        // top is not above 0.7 so everything above 0.65 survives
        let corte = corte_adaptativo(&[0.69, 0.68, 0.66, 0.64]);
        assert_eq!(corte, 3);
    }

    #[test]
    fn sin_brecha_y_todo_irrelevante_no_queda_nada() {
        assert_eq!(corte_adaptativo(&[0.3, 0.29, 0.28]), 0);
    }

    #[test]
    fn un_solo_candidato_se_conserva() {
        assert_eq!(corte_adaptativo(&[0.1]), 1);
        assert_eq!(corte_adaptativo(&[]), 0);
    }

    #[test]
    fn la_brecha_fuera_del_limite_no_cuenta() {
        // N = 10 examines only the first min(5, max(2, 3)) = 3 gaps; the big
        // drop at position 4 is ignored and the strong top survives alone
        let relevancias = [0.9, 0.89, 0.88, 0.87, 0.5, 0.4, 0.3, 0.2, 0.1, 0.0];
        assert_eq!(corte_adaptativo(&relevancias), 1);
    }

    #[test]
    fn umbral_manual_es_estrictamente_mayor() {
        assert_eq!(aplicar_umbral_manual(&[0.9, 0.5, 0.3], 0.6), 1);
        assert_eq!(aplicar_umbral_manual(&[0.9, 0.6, 0.3], 0.6), 1);
        // threshold zero over all-zero scores keeps nothing
        assert_eq!(aplicar_umbral_manual(&[0.0, 0.0, 0.0], 0.0), 0);
    }

    #[test]
    fn orden_estable_conserva_empates() {
        let id = Uuid::new_v4;
        let mut candidatos = vec![
            Candidato { documento_id: id(), titulo: "a".into(), descripcion: String::new(), relevancia: 0.5 },
            Candidato { documento_id: id(), titulo: "b".into(), descripcion: String::new(), relevancia: 0.9 },
            Candidato { documento_id: id(), titulo: "c".into(), descripcion: String::new(), relevancia: 0.5 },
        ];
        ordenar_por_relevancia(&mut candidatos);
        let titulos: Vec<_> = candidatos.iter().map(|c| c.titulo.as_str()).collect();
        assert_eq!(titulos, ["b", "a", "c"]);
    }

    #[test]
    fn fragmento_trunca_a_cien_caracteres() {
        let largo = "x".repeat(150);
        let frag = fragmento(&largo);
        assert_eq!(frag.chars().count(), 103);
        assert!(frag.ends_with("..."));

        assert_eq!(fragmento("corto"), "corto");
    }

    #[test]
    fn redondeos() {
        assert_eq!(redondear2(0.8567), 0.86);
        assert_eq!(redondear3(1.23456), 1.235);
    }
}
