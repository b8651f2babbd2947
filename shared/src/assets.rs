//! Icon URL builders for Data Dragon and CommunityDragon assets.
//!
//! These only format strings. The patch version and the augment table are
//! resolved elsewhere and passed in.

use std::collections::HashMap;

pub const DDRAGON_CDN: &str = "https://ddragon.leagueoflegends.com/cdn";

const PERK_IMAGES: &str = "https://ddragon.leagueoflegends.com/cdn/img/perk-images";

const TIER_ICON_BASE: &str = "https://raw.communitydragon.org/latest/plugins/rcp-fe-lol-static-assets/global/default/images/ranked-mini-crests";

/// Base of every versioned image URL.
pub fn ddragon_base(version: &str) -> String {
    format!("{DDRAGON_CDN}/{version}/img")
}

pub fn champion_icon_url(champion_name: &str, version: &str) -> String {
    // The match API reports this one champion with a different casing
    let champion_name = match champion_name {
        "FiddleSticks" => "Fiddlesticks",
        name => name,
    };
    format!("{}/champion/{champion_name}.png", ddragon_base(version))
}

pub fn item_icon_url(item_id: u32, version: &str) -> String {
    format!("{}/item/{item_id}.png", ddragon_base(version))
}

pub fn profile_icon_url(profile_icon_id: u32, version: &str) -> String {
    format!("{}/profileicon/{profile_icon_id}.png", ddragon_base(version))
}

fn summoner_spell_name(spell_id: u32) -> &'static str {
    match spell_id {
        1 => "SummonerBoost",
        3 => "SummonerExhaust",
        4 => "SummonerFlash",
        6 => "SummonerHaste",
        7 => "SummonerHeal",
        11 => "SummonerSmite",
        12 => "SummonerTeleport",
        13 => "SummonerMana",
        14 => "SummonerDot",
        21 => "SummonerBarrier",
        32 => "SummonerSnowball",
        _ => "SummonerFlash",
    }
}

/// Unknown spells fall back to Flash.
pub fn spell_icon_url(spell_id: u32, version: &str) -> String {
    format!(
        "{}/spell/{}.png",
        ddragon_base(version),
        summoner_spell_name(spell_id)
    )
}

fn keystone_path(rune_id: u32) -> Option<&'static str> {
    let path = match rune_id {
        // Precision
        8005 => "Styles/Precision/PressTheAttack/PressTheAttack.png",
        8008 => "Styles/Precision/LethalTempo/LethalTempoTemp.png",
        8021 => "Styles/Precision/FleetFootwork/FleetFootwork.png",
        8010 => "Styles/Precision/Conqueror/Conqueror.png",
        // Domination
        8112 => "Styles/Domination/Electrocute/Electrocute.png",
        8124 => "Styles/Domination/Predator/Predator.png",
        8128 => "Styles/Domination/DarkHarvest/DarkHarvest.png",
        9923 => "Styles/Domination/HailOfBlades/HailOfBlades.png",
        // Sorcery
        8214 => "Styles/Sorcery/SummonAery/SummonAery.png",
        8229 => "Styles/Sorcery/ArcaneComet/ArcaneComet.png",
        8230 => "Styles/Sorcery/PhaseRush/PhaseRush.png",
        // Resolve
        8437 => "Styles/Resolve/GraspOfTheUndying/GraspOfTheUndying.png",
        8439 => "Styles/Resolve/VeteranAftershock/VeteranAftershock.png",
        8465 => "Styles/Resolve/Guardian/Guardian.png",
        // Inspiration
        8351 => "Styles/Inspiration/GlacialAugment/GlacialAugment.png",
        8360 => "Styles/Inspiration/UnsealedSpellbook/UnsealedSpellbook.png",
        8369 => "Styles/Inspiration/FirstStrike/FirstStrike.png",
        _ => return None,
    };
    Some(path)
}

pub fn keystone_icon_url(rune_id: u32) -> Option<String> {
    keystone_path(rune_id).map(|path| format!("{PERK_IMAGES}/{path}"))
}

pub fn rune_style_icon_url(style_id: u32) -> Option<String> {
    let filename = match style_id {
        8000 => "7201_Precision.png",
        8100 => "7200_Domination.png",
        8200 => "7202_Sorcery.png",
        8300 => "7203_Whimsy.png",
        8400 => "7204_Resolve.png",
        _ => return None,
    };
    Some(format!("{PERK_IMAGES}/Styles/{filename}"))
}

pub fn tier_icon_url(tier: &str) -> String {
    format!("{TIER_ICON_BASE}/{}.png", tier.to_lowercase())
}

pub fn unranked_icon_url() -> String {
    tier_icon_url("unranked")
}

/// Missing augments are simply not shown.
pub fn augment_icon_url(table: &HashMap<u32, String>, augment_id: u32) -> Option<&str> {
    table.get(&augment_id).map(String::as_str)
}
