//! Sequences baked into the SHAPES terminal view.

use crate::Sequence;

/// Name of the canonical fallback sequence.
pub const IDENTITY: &str = "identity";
/// Name of the loading spinner sequence.
pub const LOADING: &str = "loading";
/// Name of the concept-cycling sequence.
pub const CONCEPTS: &str = "concepts";

const IDENTITY_FRAMES: [&str; 5] = [
    r"
      .-''''-.
    .'        '.
   /            \
  |              |
   \            /
    '.        .'
      '-....-'
",
    r"
      .------.
    .'        '.
   |            |
   |            |
   |            |
    '.        .'
      '------'
",
    r"
    +----------+
    |          |
    |          |
    |          |
    |          |
    |          |
    +----------+
",
    r"
         /\
        /  \
       /    \
      /      \
     /        \
    /          \
   /____________\
",
    r"
   ___ _  _   _   ___ ___ ___
  / __| || | /_\ | _ \ __/ __|
  \__ \ __ |/ _ \|  _/ _|\__ \
  |___/_||_/_/ \_\_| |___|___/
",
];

const LOADING_FRAMES: [&str; 4] = [
    r"
  [=         ]  shaping
",
    r"
  [====      ]  shaping.
",
    r"
  [=======   ]  shaping..
",
    r"
  [==========]  shaping...
",
];

const CONCEPTS_FRAMES: [&str; 4] = [
    r"
  +---------+
  |  FORM   |
  +---------+
",
    r"
  +---------+
  |  SPACE  |
  +---------+
",
    r"
  +---------+
  | MOTION  |
  +---------+
",
    r"
  +---------+
  |  PLAY   |
  +---------+
",
];

fn art(frames: &[&'static str]) -> Vec<&'static str> {
    frames
        .iter()
        .map(|f| f.strip_prefix('\n').unwrap_or(f))
        .collect()
}

/// All builtin sequences, fallback first.
pub(crate) fn sequences() -> Vec<Sequence> {
    vec![
        Sequence::from_static(IDENTITY, &art(&IDENTITY_FRAMES)).with_suggested_interval(800),
        Sequence::from_static(LOADING, &art(&LOADING_FRAMES)).with_suggested_interval(1000),
        Sequence::from_static(CONCEPTS, &art(&CONCEPTS_FRAMES)).with_suggested_interval(1500),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_sequences_are_populated() {
        let seqs = sequences();
        assert_eq!(seqs[0].name(), IDENTITY);
        for seq in &seqs {
            assert!(!seq.is_empty(), "{} has no frames", seq.name());
            assert!(seq.frames().iter().all(|f| !f.is_empty()));
            assert!(!seq.frames()[0].as_str().starts_with('\n'));
        }
    }

    #[test]
    fn test_loading_has_four_frames() {
        let seqs = sequences();
        let loading = seqs.iter().find(|s| s.name() == LOADING).unwrap();
        assert_eq!(loading.len(), 4);
        assert_eq!(loading.suggested_interval_ms(), Some(1000));
    }
}
