use serde::{de, ser};

use super::*;

// [Family]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Family {
    Bamboo,
    Characters,
    Dots,
    Dragon,
    Wind,
    Flower,
    Season,
}

impl Family {
    pub const ALL: [Family; FAMILY] = [
        Family::Bamboo,
        Family::Characters,
        Family::Dots,
        Family::Dragon,
        Family::Wind,
        Family::Flower,
        Family::Season,
    ];

    #[inline]
    pub fn index(self) -> Index {
        self as Index
    }

    // 数牌
    #[inline]
    pub fn is_suited(self) -> bool {
        matches!(self, Family::Bamboo | Family::Characters | Family::Dots)
    }

    // 字牌
    #[inline]
    pub fn is_honor(self) -> bool {
        matches!(self, Family::Dragon | Family::Wind)
    }

    // 花牌
    #[inline]
    pub fn is_bonus(self) -> bool {
        matches!(self, Family::Flower | Family::Season)
    }

    // 有効な数字の最大値
    pub fn max_rank(self) -> Rank {
        match self {
            Family::Bamboo | Family::Characters | Family::Dots => 9,
            Family::Dragon => 3,
            Family::Wind | Family::Flower | Family::Season => 4,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Family::Bamboo => "bamboo",
            Family::Characters => "characters",
            Family::Dots => "dots",
            Family::Dragon => "dragons",
            Family::Wind => "winds",
            Family::Flower => "flowers",
            Family::Season => "seasons",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.name() == s)
    }
}

// [Tile]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tile(pub Family, pub Rank); // (family, rank)

impl Tile {
    #[inline]
    pub fn is_suited(&self) -> bool {
        self.0.is_suited()
    }

    // 同じ種類でrankがn大きい牌 範囲外の場合はNone
    pub fn offset(&self, n: isize) -> Option<Tile> {
        let r = self.1 as isize + n;
        if r < 1 || r > self.0.max_rank() as isize {
            return None;
        }
        Some(Tile(self.0, r as Rank))
    }

    // "bamboo1", "dragons3" など
    pub fn from_symbol(s: &str) -> Result<Self, String> {
        let pos = s
            .find(|c: char| c.is_ascii_digit())
            .ok_or_else(|| format!("missing rank: '{}'", s))?;
        let (name, num) = s.split_at(pos);
        let family =
            Family::from_name(&name.to_lowercase()).ok_or_else(|| format!("unknown tile family: '{}'", name))?;
        let rank: Rank = num.parse().map_err(|_| format!("invalid rank: '{}'", num))?;
        if rank == 0 || rank > family.max_rank() {
            return Err(format!("rank out of range: '{}'", s));
        }
        Ok(Self(family, rank))
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.0.name(), self.1)
    }
}

impl fmt::Debug for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl ser::Serialize for Tile {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

struct TileVisitor;

impl<'de> de::Visitor<'de> for TileVisitor {
    type Value = Tile;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("tile symbol")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Tile::from_symbol(v).map_err(E::custom)
    }
}

impl<'de> de::Deserialize<'de> for Tile {
    fn deserialize<D>(deserializer: D) -> Result<Self, <D as de::Deserializer<'de>>::Error>
    where
        D: de::Deserializer<'de>,
    {
        deserializer.deserialize_str(TileVisitor)
    }
}

// [TileTable]
// 牌の枚数のテーブル (手牌などの多重集合)
pub type TileRow = [usize; RANK];
pub type TileTable = [TileRow; FAMILY];

#[test]
fn test_tile_symbol() {
    let t = Tile::from_symbol("bamboo7").unwrap();
    assert_eq!(t, Tile(Family::Bamboo, 7));
    assert_eq!(t.to_string(), "bamboo7");
    assert_eq!(Tile::from_symbol("Dragons3").unwrap(), Tile(Family::Dragon, 3));
    assert!(Tile::from_symbol("dragons4").is_err());
    assert!(Tile::from_symbol("dots0").is_err());
    assert!(Tile::from_symbol("pin5").is_err());
    assert!(Tile::from_symbol("winds").is_err());
}

#[test]
fn test_tile_order() {
    let mut v = vec![
        Tile(Family::Wind, 1),
        Tile(Family::Dots, 9),
        Tile(Family::Bamboo, 3),
        Tile(Family::Bamboo, 1),
    ];
    v.sort();
    assert_eq!(
        v,
        vec![
            Tile(Family::Bamboo, 1),
            Tile(Family::Bamboo, 3),
            Tile(Family::Dots, 9),
            Tile(Family::Wind, 1),
        ]
    );
}

#[test]
fn test_tile_serde() {
    let t = Tile(Family::Season, 2);
    let s = serde_json::to_string(&t).unwrap();
    assert_eq!(s, "\"seasons2\"");
    let t2: Tile = serde_json::from_str(&s).unwrap();
    assert_eq!(t, t2);
}
