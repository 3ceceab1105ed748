use serde::{Deserialize, Serialize};

/// Marker category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[repr(u8)]
pub enum MarkerCategory {
    Player = 0,
    Goldmine = 1,
    Oil = 2,
    Resource = 3,
}

impl MarkerCategory {
    /// Ordinal table of the compact wire format, indexed by `marker_type_id`
    pub const ORDINALS: [MarkerCategory; 4] = [
        Self::Player,
        Self::Goldmine,
        Self::Oil,
        Self::Resource,
    ];

    pub fn from_ordinal(v: u8) -> Option<Self> {
        Self::ORDINALS.get(v as usize).copied()
    }

    pub fn ordinal(self) -> u8 {
        self as u8
    }
}

/// Faction of a player start structure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Faction {
    Human,
    Orc,
}

impl Faction {
    pub fn name(self) -> &'static str {
        match self {
            Self::Human => "Human",
            Self::Orc => "Orc",
        }
    }
}

/// Point of interest on the decoded map
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marker {
    pub x: u16,
    pub y: u16,
    pub marker_type: MarkerCategory,
    pub label: String,
    pub amount: Option<u32>,
    /// Owning player slot, set for player markers decoded from unit records
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<u8>,
}

impl Marker {
    /// Resource-style marker; a zero amount is reported as absent
    pub fn with_amount(marker_type: MarkerCategory, x: u16, y: u16, amount: u32) -> Self {
        Self {
            x,
            y,
            marker_type,
            label: label_for(marker_type, amount),
            amount: (amount != 0).then_some(amount),
            owner: None,
        }
    }

    pub fn player(x: u16, y: u16, owner: u8, faction: Faction) -> Self {
        Self {
            x,
            y,
            marker_type: MarkerCategory::Player,
            label: format!("Player {} ({})", owner as u16 + 1, faction.name()),
            amount: None,
            owner: Some(owner),
        }
    }

    pub fn in_bounds(&self, width: u16, height: u16) -> bool {
        self.x < width && self.y < height
    }
}

/// Display label derived from category and amount
pub fn label_for(marker_type: MarkerCategory, amount: u32) -> String {
    match marker_type {
        MarkerCategory::Goldmine => format!("Gold: {amount}"),
        MarkerCategory::Oil => format!("Oil: {amount}"),
        MarkerCategory::Resource => format!("Resource: {amount}"),
        MarkerCategory::Player => "Start Position".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(label_for(MarkerCategory::Goldmine, 125000), "Gold: 125000");
        assert_eq!(label_for(MarkerCategory::Oil, 40), "Oil: 40");
        assert_eq!(label_for(MarkerCategory::Resource, 7), "Resource: 7");
    }

    #[test]
    fn test_zero_amount_is_absent() {
        let marker = Marker::with_amount(MarkerCategory::Goldmine, 1, 2, 0);
        assert_eq!(marker.amount, None);
        let marker = Marker::with_amount(MarkerCategory::Oil, 1, 2, 9);
        assert_eq!(marker.amount, Some(9));
    }

    #[test]
    fn test_player_marker() {
        let marker = Marker::player(3, 4, 0, Faction::Orc);
        assert_eq!(marker.marker_type, MarkerCategory::Player);
        assert_eq!(marker.label, "Player 1 (Orc)");
        assert_eq!(marker.owner, Some(0));
        assert_eq!(marker.amount, None);
    }

    #[test]
    fn test_bounds() {
        let marker = Marker::with_amount(MarkerCategory::Oil, 9, 9, 1);
        assert!(marker.in_bounds(10, 10));
        assert!(!marker.in_bounds(9, 10));
        assert!(!marker.in_bounds(10, 9));
    }

    #[test]
    fn test_ordinals() {
        assert_eq!(MarkerCategory::from_ordinal(1), Some(MarkerCategory::Goldmine));
        assert_eq!(MarkerCategory::from_ordinal(4), None);
        assert_eq!(MarkerCategory::Resource.ordinal(), 3);
    }
}
