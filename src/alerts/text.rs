//! Strings displayed on the alert surface.
//!
//! Templates use positional placeholders (`{0}`, `{1}`, ...) so that they can
//! be translated without touching the code.

use serde::Deserialize;

use crate::game::GameSnapshot;

/// Localizable templates for the alert surface.
///
/// # YAML Section
///
/// ```yaml
/// strings:
///   game_start: "Game starting"
///   game_end: "Game over"
///   round: "Jailbreak {0} of {1}"
///   afoot: "Game afoot"
///   flags: "Flags: {0} red / {1} yellow"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Strings {
    /// Title before the first round
    pub game_start: String,
    /// Title once the last round is reached
    pub game_end: String,
    /// Title during the game, `{0}` is the round and `{1}` the number of breaks
    pub round: String,
    /// Subtext while the game runs without any rationale
    pub afoot: String,
    /// Free text for the flags, `{0}` is red and `{1}` is yellow
    pub flags: String,
}

impl Default for Strings {
    fn default() -> Self {
        Strings {
            game_start: "Game starting".to_string(),
            game_end: "Game over".to_string(),
            round: "Jailbreak {0} of {1}".to_string(),
            afoot: "Game afoot".to_string(),
            flags: "Flags: {0} red / {1} yellow".to_string(),
        }
    }
}

impl Strings {
    /// Title matching the position of the game in its rounds.
    pub fn round_title(&self, game: &GameSnapshot) -> String {
        if game.round == 0 {
            self.game_start.clone()
        } else if game.round == game.rounds {
            self.game_end.clone()
        } else {
            format_positional(
                &self.round,
                &[
                    game.round.to_string(),
                    game.rounds.saturating_sub(1).to_string(),
                ],
            )
        }
    }

    /// Free text summarising the captured flags.
    pub fn flags_text(&self, game: &GameSnapshot) -> String {
        format_positional(
            &self.flags,
            &[game.flags_red.to_string(), game.flags_yel.to_string()],
        )
    }
}

/// Replaces every `{n}` placeholder by the `n`th argument.
///
/// Placeholders without matching argument are left as is.
pub fn format_positional(template: &str, args: &[String]) -> String {
    args.iter()
        .enumerate()
        .fold(template.to_string(), |text, (index, arg)| {
            text.replace(&format!("{{{}}}", index), arg)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(round: u32, rounds: u32) -> GameSnapshot {
        GameSnapshot {
            round,
            rounds,
            ..Default::default()
        }
    }

    #[test]
    fn test_format_positional() {
        let text = format_positional("{1} after {0}, {1} again", &["a".into(), "b".into()]);
        assert_eq!(text, "b after a, b again");
    }

    #[test]
    fn test_format_positional_missing_argument() {
        assert_eq!(format_positional("{0} {2}", &["x".into()]), "x {2}");
    }

    #[test]
    fn test_round_title() {
        let strings = Strings::default();

        assert_eq!(strings.round_title(&game(0, 5)), "Game starting");
        assert_eq!(strings.round_title(&game(5, 5)), "Game over");
        assert_eq!(strings.round_title(&game(2, 5)), "Jailbreak 2 of 4");
    }

    #[test]
    fn test_round_title_without_rounds() {
        let strings = Strings::default();
        assert_eq!(strings.round_title(&game(0, 0)), "Game starting");
    }

    #[test]
    fn test_flags_text() {
        let strings = Strings {
            flags: "{0}/{1}".to_string(),
            ..Default::default()
        };
        let game = GameSnapshot {
            flags_red: 3,
            flags_yel: 1,
            ..Default::default()
        };

        assert_eq!(strings.flags_text(&game), "3/1");
    }
}
