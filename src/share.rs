use crate::models::ShareableCard;

/// Hashtags the share intent always carries, comma-joined per the intent URL
/// contract.
const SHARE_HASHTAGS: &str = "LeagueOfLegends,RiftRewind";

/// The plain-text form of a card. The same text feeds both outbound
/// channels: the share-intent URL and the clipboard.
pub fn share_text(card: &ShareableCard) -> String {
    format!("{}\n{}\n{}", card.title, card.subtitle, card.stat)
}

/// The X post-intent URL for a card, with the share text percent-encoded.
/// Opening it is the caller's side of the contract.
pub fn share_intent_url(card: &ShareableCard) -> String {
    format!(
        "https://twitter.com/intent/tweet?text={}&hashtags={}",
        urlencoding::encode(&share_text(card)),
        SHARE_HASHTAGS
    )
}
