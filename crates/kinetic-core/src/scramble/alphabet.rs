use rand::Rng;

use crate::{Error, Result};

const NAV: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ1234567890!@#$%^&*()_+";
const EXTENDED: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*()_+";

/// Noise characters a scramble draws from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    chars: Vec<char>,
}

impl Alphabet {
    pub fn new(chars: &str) -> Result<Self> {
        let chars: Vec<char> = chars.chars().collect();
        if chars.is_empty() {
            return Err(Error::EmptyAlphabet);
        }
        Ok(Self { chars })
    }

    /// Uppercase letters, digits and symbols
    pub fn nav() -> Self {
        Self {
            chars: NAV.chars().collect(),
        }
    }

    /// Upper- and lowercase letters, digits and symbols
    pub fn extended() -> Self {
        Self {
            chars: EXTENDED.chars().collect(),
        }
    }

    /// Resolve a configured name ("nav", "extended") or a literal character set
    pub fn from_setting(setting: &str) -> Result<Self> {
        match setting {
            "nav" => Ok(Self::nav()),
            "extended" => Ok(Self::extended()),
            literal => Self::new(literal),
        }
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn contains(&self, c: char) -> bool {
        self.chars.contains(&c)
    }

    /// Uniformly random character
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> char {
        self.chars[rng.gen_range(0..self.chars.len())]
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::nav()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_empty_rejected() {
        assert!(matches!(Alphabet::new(""), Err(Error::EmptyAlphabet)));
    }

    #[test]
    fn test_from_setting() {
        assert_eq!(Alphabet::from_setting("nav").unwrap(), Alphabet::nav());
        assert_eq!(Alphabet::from_setting("extended").unwrap().len(), 74);
        assert_eq!(Alphabet::from_setting("XYZ").unwrap().len(), 3);
    }

    #[test]
    fn test_pick_stays_in_set() {
        let alphabet = Alphabet::new("XYZ123").unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            assert!(alphabet.contains(alphabet.pick(&mut rng)));
        }
    }
}
