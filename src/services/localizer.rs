//! Rewrites provider instruction strings into the display language.
//!
//! Translation is a fixed, ordered table of literal phrase substitutions.
//! Phrases only match on word boundaries, so short entries such as "in" or
//! "east" never rewrite the inside of other words.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Language {
    #[default]
    #[serde(rename = "pt-BR")]
    PtBr,
    #[serde(rename = "en")]
    En,
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::PtBr => write!(f, "pt-BR"),
            Language::En => write!(f, "en"),
        }
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pt" | "pt-br" | "pt_br" => Ok(Language::PtBr),
            "en" | "en-us" | "en_us" => Ok(Language::En),
            _ => Err(format!("Unsupported language: '{}'", s)),
        }
    }
}

/// English -> Brazilian Portuguese, most specific phrases first.
const PT_BR_PHRASES: &[(&str, &str)] = &[
    ("Restricted usage road", "Estrada de uso restrito"),
    ("Continue to follow", "Continue seguindo pela"),
    ("Walk your bicycle", "Desça da bicicleta"),
    ("At the roundabout", "Na rotatória"),
    ("on the right side", "do lado direito"),
    ("on the left side", "do lado esquerdo"),
    ("take the 1st exit", "pegue a 1ª saída"),
    ("take the 2nd exit", "pegue a 2ª saída"),
    ("take the 3rd exit", "pegue a 3ª saída"),
    ("take the 4th exit", "pegue a 4ª saída"),
    ("take the 5th exit", "pegue a 5ª saída"),
    ("Make a U-turn", "Faça o retorno"),
    ("Continue onto", "Continue pela"),
    ("Slight right", "Vire levemente à direita"),
    ("Slight left", "Vire levemente à esquerda"),
    ("Sharp right", "Vire acentuadamente à direita"),
    ("Sharp left", "Vire acentuadamente à esquerda"),
    ("Turn right", "Vire à direita"),
    ("Turn left", "Vire à esquerda"),
    ("Keep right", "Mantenha-se à direita"),
    ("Keep left", "Mantenha-se à esquerda"),
    ("on the right", "à direita"),
    ("on the left", "à esquerda"),
    ("Destination", "Destino"),
    ("will be", "estará"),
    ("Pass by", "Passe por"),
    ("northeast", "nordeste"),
    ("northwest", "noroeste"),
    ("southeast", "sudeste"),
    ("southwest", "sudoeste"),
    ("toward", "em direção a"),
    ("north", "norte"),
    ("south", "sul"),
    ("east", "leste"),
    ("west", "oeste"),
    ("Head", "Siga"),
    ("Turn", "Vire"),
    ("Take", "Pegue"),
    ("roundabout", "rotatória"),
    ("exit", "saída"),
    ("until", "até"),
    ("then", "depois"),
    ("right", "direita"),
    ("left", "esquerda"),
];

struct Substitution {
    pattern: Regex,
    replacement: &'static str,
}

/// Deterministic instruction rewriter for one target language.
pub struct InstructionLocalizer {
    language: Language,
    substitutions: Vec<Substitution>,
}

impl InstructionLocalizer {
    pub fn new(language: Language) -> Self {
        let table: &[(&str, &str)] = match language {
            Language::PtBr => PT_BR_PHRASES,
            Language::En => &[],
        };

        // Longest phrase first, so "Turn right" is consumed before "right"
        let mut ordered: Vec<&(&str, &str)> = table.iter().collect();
        ordered.sort_by_key(|(phrase, _)| std::cmp::Reverse(phrase.chars().count()));

        let substitutions = ordered
            .into_iter()
            .filter_map(|(phrase, replacement)| {
                Regex::new(&format!(r"\b{}\b", regex::escape(phrase)))
                    .ok()
                    .map(|pattern| Substitution {
                        pattern,
                        replacement,
                    })
            })
            .collect();

        InstructionLocalizer {
            language,
            substitutions,
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Always returns a string; phrases missing from the table stay as-is.
    pub fn localize(&self, instruction: &str) -> String {
        let mut text = instruction.to_string();
        for sub in &self.substitutions {
            if sub.pattern.is_match(&text) {
                text = sub
                    .pattern
                    .replace_all(&text, regex::NoExpand(sub.replacement))
                    .into_owned();
            }
        }
        text
    }

    pub fn localize_all(&self, instructions: &[String]) -> Vec<String> {
        instructions.iter().map(|i| self.localize(i)).collect()
    }
}
