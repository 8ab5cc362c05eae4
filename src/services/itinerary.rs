//! Short "main roads" summary of a localized itinerary.

use crate::constants::{FALLBACK_HIGHLIGHTS, MAX_HIGHLIGHTS};

const ROAD_PREFIXES: [&str; 9] = [
    "Rua", "R.", "Avenida", "Av.", "Praça", "Pça.", "Pça", "Estrada", "Rodovia",
];

/// Phrases after which an instruction stops naming the road
const CONNECTIVES: [&str; 3] = [" em direção", " após", " Passe por"];

/// Road name plus at most this many words
const MAX_ROAD_WORDS: usize = 5;

/// Cut an instruction at the first connective phrase
fn trim_connectives(instruction: &str) -> &str {
    let cut = CONNECTIVES
        .iter()
        .filter_map(|c| instruction.find(c))
        .min()
        .unwrap_or(instruction.len());
    instruction[..cut].trim()
}

/// First main-road mention in an instruction, if any
fn road_mention(instruction: &str) -> Option<String> {
    let words: Vec<&str> = trim_connectives(instruction).split_whitespace().collect();
    let start = words.iter().position(|w| ROAD_PREFIXES.contains(w))?;

    // A bare prefix is not a road name
    if start + 1 >= words.len() {
        return None;
    }

    let end = (start + MAX_ROAD_WORDS).min(words.len());
    let name = words[start..end].join(" ");
    Some(name.trim_end_matches([',', ';']).to_string())
}

/// Distinct main roads in route order. Falls back to the first few
/// instructions when none name a road.
pub fn main_roads(instructions: &[String]) -> Vec<String> {
    let mut roads: Vec<String> = Vec::new();
    for mention in instructions.iter().filter_map(|i| road_mention(i)) {
        if !roads.contains(&mention) {
            roads.push(mention);
        }
        if roads.len() == MAX_HIGHLIGHTS {
            break;
        }
    }

    if !roads.is_empty() {
        return roads;
    }

    instructions
        .iter()
        .map(|i| trim_connectives(i).to_string())
        .filter(|i| !i.is_empty())
        .take(FALLBACK_HIGHLIGHTS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_extracts_distinct_roads() {
        let itinerary = owned(&[
            "Siga norte na Rua Sete de Setembro em direção a Praça Afonso Pena",
            "Vire à direita na Av. São João",
            "Vire à esquerda na Av. São João",
            "Continue pela Avenida Doutor Nelson D'Ávila após 200 m",
        ]);

        assert_eq!(
            main_roads(&itinerary),
            vec![
                "Rua Sete de Setembro".to_string(),
                "Av. São João".to_string(),
                "Avenida Doutor Nelson D'Ávila".to_string(),
            ]
        );
    }

    #[test]
    fn test_long_names_are_cut() {
        let itinerary = owned(&["Pegue a Rodovia Presidente Dutra sentido Rio de Janeiro"]);
        assert_eq!(
            main_roads(&itinerary),
            vec!["Rodovia Presidente Dutra sentido Rio".to_string()]
        );
    }

    #[test]
    fn test_highlights_are_capped() {
        let itinerary: Vec<String> = (0..12).map(|i| format!("Vire na Rua {}", i)).collect();
        assert_eq!(main_roads(&itinerary).len(), MAX_HIGHLIGHTS);
    }

    #[test]
    fn test_falls_back_to_first_instructions() {
        let itinerary = owned(&[
            "Siga norte",
            "Vire à direita em direção ao centro",
            "Mantenha-se à esquerda",
            "Vire à direita",
            "Siga em frente",
            "Destino estará à direita",
        ]);

        let summary = main_roads(&itinerary);
        assert_eq!(summary.len(), FALLBACK_HIGHLIGHTS);
        assert_eq!(summary[1], "Vire à direita");
    }
}
