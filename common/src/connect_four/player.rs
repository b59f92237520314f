use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
#[error("{0} is not a player number")]
pub struct UnknownPlayer(u8);

// Serialized as the bare player number so clients see 1 or 2
#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(into = "u8", try_from = "u8")]
pub enum PlayerNum {
    P1,
    P2,
}

impl PlayerNum {
    pub fn other(self) -> PlayerNum {
        match self {
            PlayerNum::P1 => PlayerNum::P2,
            PlayerNum::P2 => PlayerNum::P1,
        }
    }

    pub fn number(self) -> u8 {
        match self {
            PlayerNum::P1 => 1,
            PlayerNum::P2 => 2,
        }
    }
}

impl From<PlayerNum> for u8 {
    fn from(player_num: PlayerNum) -> Self {
        player_num.number()
    }
}

impl TryFrom<u8> for PlayerNum {
    type Error = UnknownPlayer;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        match n {
            1 => Ok(PlayerNum::P1),
            2 => Ok(PlayerNum::P2),
            _ => Err(UnknownPlayer(n)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_player() {
        assert_eq!(PlayerNum::P1.other(), PlayerNum::P2);
        assert_eq!(PlayerNum::P2.other(), PlayerNum::P1);
    }

    #[test]
    fn test_player_number_conversion() {
        assert_eq!(u8::from(PlayerNum::P2), 2);
        assert_eq!(PlayerNum::try_from(1), Ok(PlayerNum::P1));
        assert_eq!(PlayerNum::try_from(3), Err(UnknownPlayer(3)));
    }

    #[test]
    fn test_serialize_as_number() {
        assert_eq!(serde_json::to_string(&PlayerNum::P1).unwrap(), "1");
        let p: PlayerNum = serde_json::from_str("2").unwrap();
        assert_eq!(p, PlayerNum::P2);
        assert!(serde_json::from_str::<PlayerNum>("0").is_err());
    }
}
