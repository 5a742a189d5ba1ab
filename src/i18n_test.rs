use super::*;

#[test]
fn translate_returns_requested_language() {
    assert_eq!(translate("nav.home", Language::EnUs), "Home");
    assert_eq!(translate("nav.home", Language::DeDe), "Startseite");
    assert_eq!(translate("nav.home", Language::PtBr), "Início");
}

#[test]
fn translate_missing_language_falls_back_to_pt_br() {
    // Quick questions only carry pt-BR and en-US.
    assert_eq!(translate("assistant.quick.author.label", Language::FrFr), "Quem criou?");
    assert_eq!(translate("assistant.quick.author.label", Language::EnUs), "Who made it?");
}

#[test]
fn translate_unknown_key_returns_key() {
    assert_eq!(translate("does.not.exist", Language::ItIt), "does.not.exist");
}

#[test]
fn translate_es_download_button() {
    assert_eq!(translate("dl.btn", Language::EsEs), "Descargar Ahora");
}

#[test]
fn catalog_covers_every_key_for_every_language() {
    for lang in Language::ALL {
        let cat = catalog(lang);
        assert_eq!(cat.len(), TABLE.len(), "catalog for {lang} is missing keys");
        assert!(cat.values().all(|v| !v.is_empty()));
    }
}

#[test]
fn catalog_switches_all_nav_strings_with_language() {
    let pt = catalog(Language::PtBr);
    let en = catalog(Language::EnUs);
    assert_eq!(pt["nav.search"], "Busca Global");
    assert_eq!(en["nav.search"], "Global Search");
    assert_eq!(en["nav.generator"], "Generator");
}

#[test]
fn table_keys_are_unique() {
    let mut keys: Vec<&str> = TABLE.iter().map(|(k, _)| *k).collect();
    let before = keys.len();
    keys.sort_unstable();
    keys.dedup();
    assert_eq!(keys.len(), before);
}

#[test]
fn language_parses_codes_case_insensitively() {
    assert_eq!("en-us".parse::<Language>().unwrap(), Language::EnUs);
    assert_eq!(" it-IT ".parse::<Language>().unwrap(), Language::ItIt);
    assert!("xx-YY".parse::<Language>().is_err());
}

#[test]
fn unknown_language_code_falls_back() {
    assert_eq!(Language::parse_or_fallback("klingon"), FALLBACK_LANGUAGE);
    assert_eq!(Language::parse_or_fallback("fr-FR"), Language::FrFr);
}

#[test]
fn language_serde_uses_codes() {
    assert_eq!(serde_json::to_string(&Language::DeDe).unwrap(), "\"de-DE\"");
    let lang: Language = serde_json::from_str("\"es-ES\"").unwrap();
    assert_eq!(lang, Language::EsEs);
    assert_eq!(Language::EsEs.label(), "Español");
}
