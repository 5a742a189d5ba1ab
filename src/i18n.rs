//! Localization table — static key → per-language display strings.
//!
//! DESIGN
//! ======
//! Each entry lists the languages it has been translated into. Lookups fall
//! back to [`FALLBACK_LANGUAGE`] when an entry lacks the requested language,
//! and to the key itself when the key is unknown, so a missing translation
//! never blanks a label.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

// =============================================================================
// LANGUAGE
// =============================================================================

/// Display languages supported by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "pt-BR")]
    PtBr,
    #[serde(rename = "en-US")]
    EnUs,
    #[serde(rename = "es-ES")]
    EsEs,
    #[serde(rename = "fr-FR")]
    FrFr,
    #[serde(rename = "de-DE")]
    DeDe,
    #[serde(rename = "it-IT")]
    ItIt,
}

/// Language used when a translation or a language code is missing.
pub const FALLBACK_LANGUAGE: Language = Language::PtBr;

impl Language {
    pub const ALL: [Language; 6] =
        [Language::PtBr, Language::EnUs, Language::EsEs, Language::FrFr, Language::DeDe, Language::ItIt];

    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::PtBr => "pt-BR",
            Self::EnUs => "en-US",
            Self::EsEs => "es-ES",
            Self::FrFr => "fr-FR",
            Self::DeDe => "de-DE",
            Self::ItIt => "it-IT",
        }
    }

    /// Human-readable name used inside model prompts ("answer in ...").
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::PtBr => "Português Brasil",
            Self::EnUs => "English",
            Self::EsEs => "Español",
            Self::FrFr => "Français",
            Self::DeDe => "Deutsch",
            Self::ItIt => "Italiano",
        }
    }

    /// Parse a language code, falling back to [`FALLBACK_LANGUAGE`].
    #[must_use]
    pub fn parse_or_fallback(code: &str) -> Self {
        code.parse().unwrap_or(FALLBACK_LANGUAGE)
    }
}

impl Default for Language {
    fn default() -> Self {
        FALLBACK_LANGUAGE
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unsupported language code: {0}")]
pub struct UnknownLanguage(pub String);

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|lang| lang.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownLanguage(s.to_owned()))
    }
}

// =============================================================================
// LOOKUP
// =============================================================================

/// Resolve `key` for `lang`.
///
/// Falls back to the pt-BR string when the entry has no `lang` translation,
/// and to `key` itself when the key is unknown.
#[must_use]
pub fn translate<'a>(key: &'a str, lang: Language) -> &'a str {
    let Some(entry) = index().get(key) else {
        return key;
    };
    pick(entry, lang)
        .or_else(|| pick(entry, FALLBACK_LANGUAGE))
        .unwrap_or(key)
}

/// Every key in the table resolved for one language.
#[must_use]
pub fn catalog(lang: Language) -> HashMap<&'static str, &'static str> {
    TABLE
        .iter()
        .map(|&(key, entry)| (key, pick(entry, lang).or_else(|| pick(entry, FALLBACK_LANGUAGE)).unwrap_or(key)))
        .collect()
}

fn pick(entry: &[(Language, &'static str)], lang: Language) -> Option<&'static str> {
    entry
        .iter()
        .find(|(l, _)| *l == lang)
        .map(|(_, text)| *text)
}

type Entry = &'static [(Language, &'static str)];

fn index() -> &'static HashMap<&'static str, Entry> {
    static INDEX: OnceLock<HashMap<&'static str, Entry>> = OnceLock::new();
    INDEX.get_or_init(|| TABLE.iter().copied().collect())
}

// =============================================================================
// TABLE
// =============================================================================

use Language as L;

#[rustfmt::skip]
static TABLE: &[(&str, Entry)] = &[
    // Common
    ("common.status", &[(L::PtBr, "Status"), (L::EnUs, "Status"), (L::EsEs, "Estado"), (L::FrFr, "Statut"), (L::DeDe, "Status"), (L::ItIt, "Stato")]),
    ("common.encrypted", &[(L::PtBr, "Criptografado"), (L::EnUs, "Encrypted"), (L::EsEs, "Cifrado"), (L::FrFr, "Chiffré"), (L::DeDe, "Verschlüsselt"), (L::ItIt, "Criptografato")]),
    ("common.share", &[(L::PtBr, "Compartilhar Link"), (L::EnUs, "Share Link"), (L::EsEs, "Compartir Enlace"), (L::FrFr, "Partager le Lien"), (L::DeDe, "Link Teilen"), (L::ItIt, "Condividi Link")]),
    ("common.version", &[(L::PtBr, "Versão Estável"), (L::EnUs, "Stable Version"), (L::EsEs, "Versión Estable"), (L::FrFr, "Version Stable"), (L::DeDe, "Stabile Version"), (L::ItIt, "Versione Stabile")]),

    // Navigation
    ("nav.home", &[(L::PtBr, "Início"), (L::EnUs, "Home"), (L::EsEs, "Inicio"), (L::FrFr, "Accueil"), (L::DeDe, "Startseite"), (L::ItIt, "Inizio")]),
    ("nav.scanner", &[(L::PtBr, "Scanner"), (L::EnUs, "Scanner"), (L::EsEs, "Escáner"), (L::FrFr, "Scanner"), (L::DeDe, "Scanner"), (L::ItIt, "Scanner")]),
    ("nav.auditor", &[(L::PtBr, "Auditoria IA"), (L::EnUs, "AI Auditor"), (L::EsEs, "Auditoría IA"), (L::FrFr, "Audit IA"), (L::DeDe, "KI-Auditor"), (L::ItIt, "Audit IA")]),
    ("nav.autoconnect", &[(L::PtBr, "Zero-Key"), (L::EnUs, "Zero-Key"), (L::EsEs, "Zero-Key"), (L::FrFr, "Zero-Key"), (L::DeDe, "Zero-Key"), (L::ItIt, "Zero-Key")]),
    ("nav.extractor", &[(L::PtBr, "Extrator"), (L::EnUs, "Extractor"), (L::EsEs, "Extractor"), (L::FrFr, "Extracteur"), (L::DeDe, "Extraktor"), (L::ItIt, "Estrattore")]),
    ("nav.generator", &[(L::PtBr, "Gerador"), (L::EnUs, "Generator"), (L::EsEs, "Generador"), (L::FrFr, "Générateur"), (L::DeDe, "Generator"), (L::ItIt, "Generatore")]),
    ("nav.map", &[(L::PtBr, "Mapa Local"), (L::EnUs, "Local Map"), (L::EsEs, "Mapa Local"), (L::FrFr, "Carte Locale"), (L::DeDe, "Karte"), (L::ItIt, "Mappa Locale")]),
    ("nav.search", &[(L::PtBr, "Busca Global"), (L::EnUs, "Global Search"), (L::EsEs, "Búsqueda Global"), (L::FrFr, "Recherche Globale"), (L::DeDe, "Globale Suche"), (L::ItIt, "Ricerca Globale")]),
    ("nav.downloads", &[(L::PtBr, "Downloads"), (L::EnUs, "Downloads"), (L::EsEs, "Descargas"), (L::FrFr, "Téléchargements"), (L::DeDe, "Downloads"), (L::ItIt, "Download")]),

    // Downloads
    ("dl.title", &[(L::PtBr, "Instalação Multiplataforma"), (L::EnUs, "Multi-platform Installation"), (L::EsEs, "Instalación Multiplataforma"), (L::FrFr, "Installation Multiplateforme"), (L::DeDe, "Multi-Plattform Installation"), (L::ItIt, "Installazione Multiplataforma")]),
    ("dl.subtitle", &[(L::PtBr, "Acesse o Hub Oficial e baixe o instalador verificado para o seu dispositivo."), (L::EnUs, "Access the Official Hub and download the verified installer for your device."), (L::EsEs, "Accede al Hub Oficial y descarga el instalador verificado para tu dispositivo."), (L::FrFr, "Accédez au Hub Officiel et téléchargez l'installateur vérifié pour votre appareil."), (L::DeDe, "Besuchen Sie das offizielle Hub und laden Sie den verifizierten Installer für Ihr Gerät herunter."), (L::ItIt, "Accedi all'Hub Ufficiale e scarica l'installer verificato per il tuo dispositivo.")]),
    ("dl.btn", &[(L::PtBr, "Baixar Agora"), (L::EnUs, "Download Now"), (L::EsEs, "Descargar Ahora"), (L::FrFr, "Télécharger Maintenant"), (L::DeDe, "Jetzt Herunterladen"), (L::ItIt, "Scarica Ora")]),
    ("dl.qr", &[(L::PtBr, "Escanear QR Code"), (L::EnUs, "Scan QR Code"), (L::EsEs, "Escanear QR Code"), (L::FrFr, "Scanner le QR Code"), (L::DeDe, "QR Code Scannen"), (L::ItIt, "Scansiona QR Code")]),
    ("dl.safe", &[(L::PtBr, "Arquivo Verificado & Seguro"), (L::EnUs, "Verified & Safe File"), (L::EsEs, "Archivo Verificado y Seguro"), (L::FrFr, "Fichier Vérifié et Sûr"), (L::DeDe, "Verifizierte und sichere Datei"), (L::ItIt, "File Verificato e Sicuro")]),

    // Assistant
    ("assistant.title", &[(L::PtBr, "Aurora - IA Support"), (L::EnUs, "Aurora - AI Support"), (L::EsEs, "Aurora - Soporte IA"), (L::FrFr, "Aurora - Support IA"), (L::DeDe, "Aurora - KI Support"), (L::ItIt, "Aurora - Supporto IA")]),
    ("assistant.welcome", &[(L::PtBr, "Olá! Sou a Aurora. Como posso ajudar você com o WiFi WPS 5G hoje?"), (L::EnUs, "Hi! I am Aurora. How can I help you with WiFi WPS 5G today?"), (L::EsEs, "¡Hola! Soy Aurora. ¿Cómo puedo ayudarte con WiFi WPS 5G hoy?"), (L::FrFr, "Salut ! Je suis Aurora. Comment puis-je vous aider avec WiFi WPS 5G aujourd'hui ?"), (L::DeDe, "Hallo! Ich bin Aurora. Wie kann ich Ihnen heute mit WiFi WPS 5G helfen?"), (L::ItIt, "Ciao! Sono Aurora. Come posso aiutarti con WiFi WPS 5G oggi?")]),
    ("assistant.placeholder", &[(L::PtBr, "Digite sua dúvida..."), (L::EnUs, "Type your question..."), (L::EsEs, "Escribe tu duda..."), (L::FrFr, "Tapez votre question..."), (L::DeDe, "Schreiben Sie Ihre Frage..."), (L::ItIt, "Scrivi la tua domanda...")]),
    ("assistant.error", &[(L::PtBr, "Desculpe, tive um erro de conexão. Tente novamente."), (L::EnUs, "Sorry, I had a connection error. Please try again."), (L::EsEs, "Lo siento, tuve un error de conexión. Inténtalo de nuevo."), (L::FrFr, "Désolée, j'ai eu une erreur de connexion. Réessayez."), (L::DeDe, "Entschuldigung, es gab einen Verbindungsfehler. Bitte versuchen Sie es erneut."), (L::ItIt, "Scusa, ho avuto un errore di connessione. Riprova.")]),
    ("assistant.quick.download.label", &[(L::PtBr, "Como baixar?"), (L::EnUs, "How to download?")]),
    ("assistant.quick.download.query", &[(L::PtBr, "Como posso baixar o aplicativo no meu celular e computador?"), (L::EnUs, "How can I download the app on my phone and computer?")]),
    ("assistant.quick.features.label", &[(L::PtBr, "Funcionalidades"), (L::EnUs, "Features")]),
    ("assistant.quick.features.query", &[(L::PtBr, "O que o aplicativo WiFi WPS 5G é capaz de fazer?"), (L::EnUs, "What can the WiFi WPS 5G app do?")]),
    ("assistant.quick.author.label", &[(L::PtBr, "Quem criou?"), (L::EnUs, "Who made it?")]),
    ("assistant.quick.author.query", &[(L::PtBr, "Quem é o desenvolvedor deste aplicativo?"), (L::EnUs, "Who is the developer of this app?")]),
    ("assistant.quick.safety.label", &[(L::PtBr, "É seguro?"), (L::EnUs, "Is it safe?")]),
    ("assistant.quick.safety.query", &[(L::PtBr, "O aplicativo é seguro para auditar minha rede WiFi?"), (L::EnUs, "Is the app safe for auditing my WiFi network?")]),

    // Dashboard
    ("dash.hero_badge", &[(L::PtBr, "Auditor de Segurança WiFi"), (L::EnUs, "WiFi Security Auditor"), (L::EsEs, "Auditor de Seguridad WiFi"), (L::FrFr, "Auditeur de Sécurité WiFi"), (L::DeDe, "WLAN-Sicherheitsauditor"), (L::ItIt, "Audit di Sicurezza WiFi")]),
    ("dash.created_by", &[(L::PtBr, "Criado por"), (L::EnUs, "Created by"), (L::EsEs, "Creado por"), (L::FrFr, "Créé par"), (L::DeDe, "Erstellt von"), (L::ItIt, "Creato da")]),
    ("dash.welcome", &[
        (L::PtBr, "Bem-vindo à ferramenta definitiva de análise e segurança WiFi. Nossa plataforma foi desenvolvida para ajudar profissionais e entusiastas a auditar, proteger e gerenciar redes sem fio com tecnologia de ponta."),
        (L::EnUs, "Welcome to the ultimate WiFi analysis and security tool. Our platform was developed to help professionals and enthusiasts audit, protect, and manage wireless networks with cutting-edge technology."),
        (L::EsEs, "Bienvenido a la herramienta definitiva de análisis y seguridad WiFi. Nuestra plataforma ha sido desarrollada para ayudar a profesionales y entusiastas a auditar, proteger y gestionar redes inalámbricas con tecnología de vanguardia."),
        (L::FrFr, "Bienvenue dans l'outil ultime d'analyse et de sécurité WiFi. Notre plateforme a été développée pour aider les professionnels et les passionnés à auditer, protéger et gérer les réseaux sans fil avec une technologie de pointe."),
        (L::DeDe, "Willkommen beim ultimativen WLAN-Analyse- und Sicherheitstool. Unsere Plattform wurde entwickelt, um Fachleuten und Enthusiasten dabei zu helfen, drahtlose Netzwerke mit modernster Technologie zu prüfen, zu schützen und zu verwalten."),
        (L::ItIt, "Benvenuti nello strumento definitivo per l'analisi e la sicurezza WiFi. La nostra piattaforma è stata sviluppata per aiutare professionisti e appassionati a controllare, proteggere e gestire le reti wireless con tecnologie all'avanguardia."),
    ]),
    ("dash.cta", &[(L::PtBr, "Começar Escaneamento"), (L::EnUs, "Start Scanning"), (L::EsEs, "Iniciar Escaneo"), (L::FrFr, "Lancer le Scan"), (L::DeDe, "Scan Starten"), (L::ItIt, "Inizia Scansione")]),

    // Search
    ("search.placeholder", &[(L::PtBr, "Pergunte sobre pontos WiFi, provedores ou falhas na web..."), (L::EnUs, "Ask about WiFi spots, providers or web outages..."), (L::EsEs, "Pregunta sobre puntos WiFi, proveedores o fallas en la web..."), (L::FrFr, "Posez des questions sur les points WiFi, les fournisseurs ou les pannes..."), (L::DeDe, "Fragen Sie nach WLAN-Spots, Providern oder Netzwerkausfällen..."), (L::ItIt, "Chiedi di hotspot WiFi, provider o interruzioni web...")]),
    ("search.sources", &[(L::PtBr, "Fontes Verificadas (Google Search)"), (L::EnUs, "Verified Sources (Google Search)"), (L::EsEs, "Fuentes Verificadas (Google Search)"), (L::FrFr, "Sources Vérifiées (Google Search)"), (L::DeDe, "Verifizierte Quellen (Google Suche)"), (L::ItIt, "Fonti Verificate (Google Search)")]),
    ("search.source_fallback", &[(L::PtBr, "Fonte"), (L::EnUs, "Source"), (L::EsEs, "Fuente"), (L::FrFr, "Source"), (L::DeDe, "Quelle"), (L::ItIt, "Fonte")]),

    // Audit
    ("audit.error", &[(L::PtBr, "Falha ao processar auditoria com IA. Verifique sua conexão ou chave de API."), (L::EnUs, "Failed to process the AI audit. Check your connection or API key."), (L::EsEs, "Error al procesar la auditoría con IA. Verifica tu conexión o clave de API."), (L::FrFr, "Échec de l'audit IA. Vérifiez votre connexion ou votre clé API."), (L::DeDe, "KI-Audit fehlgeschlagen. Prüfen Sie Ihre Verbindung oder Ihren API-Schlüssel."), (L::ItIt, "Impossibile elaborare l'audit IA. Controlla la connessione o la chiave API.")]),

    // Zero-Key
    ("zerokey.failure", &[(L::PtBr, "O firewall do roteador detectou o excesso de tentativas e bloqueou o endereço MAC."), (L::EnUs, "The router firewall detected too many attempts and blocked the MAC address."), (L::EsEs, "El firewall del router detectó demasiados intentos y bloqueó la dirección MAC."), (L::FrFr, "Le pare-feu du routeur a détecté trop de tentatives et a bloqué l'adresse MAC."), (L::DeDe, "Die Router-Firewall hat zu viele Versuche erkannt und die MAC-Adresse gesperrt."), (L::ItIt, "Il firewall del router ha rilevato troppi tentativi e ha bloccato l'indirizzo MAC.")]),

    // Map
    ("map.analysis_error", &[(L::PtBr, "Não foi possível obter recomendações detalhadas para esta área. Tente se mover para uma zona com mais estabelecimentos comerciais."), (L::EnUs, "Could not get detailed recommendations for this area. Try moving to a zone with more businesses."), (L::EsEs, "No fue posible obtener recomendaciones detalladas para esta zona. Intenta moverte a una zona con más comercios.")]),

    // Share
    ("share.text", &[(L::PtBr, "Baixe agora o melhor auditor WiFi criado por Geilson!"), (L::EnUs, "Download the best WiFi auditor, created by Geilson!")]),
    ("share.copied", &[(L::PtBr, "Link copiado para a área de transferência!"), (L::EnUs, "Link copied to clipboard!"), (L::EsEs, "¡Enlace copiado al portapapeles!"), (L::FrFr, "Lien copié dans le presse-papiers !"), (L::DeDe, "Link in die Zwischenablage kopiert!"), (L::ItIt, "Link copiato negli appunti!")]),
];

#[cfg(test)]
#[path = "i18n_test.rs"]
mod tests;
