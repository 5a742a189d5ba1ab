//! Key extractor — scripted "memory scan" terminal plus manual recovery
//! guides for each platform.
//!
//! The terminal is theater: it always ends by recommending the manual guide.
//! Guides carry the real OS commands a user runs on their own machine.

use std::time::Duration;

use serde::Serialize;
use tracing::info;

use super::downloads::Platform;
use super::simulator::{RunHandle, RunSnapshot, RunStatus, SimulatorError, SimulatorKind, Step};
use crate::i18n::Language;
use crate::state::AppState;

pub const LINE_INTERVAL: Duration = Duration::from_millis(600);

const TERMINAL_LINES: [&str; 6] = [
    "> Initializing system deep scan...",
    "> Accessing kernel network descriptors...",
    "> Identifying saved profiles in WlanSvc...",
    "> Requesting decryption keys from TPM module...",
    "> Error: Sandbox restricted by Browser API.",
    "> Recommendation: Manual execution required for security bypass.",
];

/// Terminal script: one line per interval, progress `(i + 1) * 100 / 6`.
#[must_use]
pub fn script() -> Vec<Step> {
    let total = TERMINAL_LINES.len();
    TERMINAL_LINES
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let progress = u8::try_from((i + 1) * 100 / total).unwrap_or(100);
            Step::new(*line, LINE_INTERVAL, progress)
        })
        .collect()
}

/// Start the terminal run in the background.
///
/// # Errors
///
/// [`SimulatorError::Busy`] while a previous scan is still printing.
pub fn start(state: &AppState) -> Result<RunSnapshot, SimulatorError> {
    let handle = state.simulators.start(SimulatorKind::KeyExtraction)?;
    info!(run_id = %handle.id, "extractor: started");
    let snapshot = state.simulators.get(SimulatorKind::KeyExtraction);
    let task_state = state.clone();
    tokio::spawn(async move { run(&task_state, &handle).await });
    snapshot.ok_or(SimulatorError::NotFound(SimulatorKind::KeyExtraction))
}

async fn run(state: &AppState, handle: &RunHandle) {
    if state.simulators.run_script(handle, script()).await {
        state.simulators.finish(handle, RunStatus::Succeeded, None);
    }
}

// =============================================================================
// GUIDES
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Guide {
    pub platform: Platform,
    pub language: Language,
    pub title: &'static str,
    pub steps: [&'static str; 5],
    /// Copyable command (or settings path on mobile).
    pub command: &'static str,
}

/// Guide for `platform` in `language`; languages without a translation get
/// the pt-BR guide.
#[must_use]
pub fn guide(platform: Platform, language: Language) -> Guide {
    match language {
        Language::EnUs => guide_en(platform),
        _ => guide_pt(platform),
    }
}

fn guide_pt(platform: Platform) -> Guide {
    let (title, steps, command) = match platform {
        Platform::Windows => (
            "Recuperar no Windows",
            [
                "Abra o Prompt de Comando (CMD) como Administrador.",
                "Digite: netsh wlan show profile",
                "Identifique o nome da rede WiFi desejada.",
                "Digite: netsh wlan show profile name=\"NOME_DA_REDE\" key=clear",
                "A senha aparecerá em 'Conteúdo da Chave'.",
            ],
            "netsh wlan show profile name=\"SSID\" key=clear",
        ),
        Platform::Mac => (
            "Recuperar no macOS",
            [
                "Abra o 'Acesso às Chaves' (Keychain Access).",
                "No campo de busca, digite o nome do WiFi.",
                "Clique duas vezes no item da rede encontrada.",
                "Marque a caixa 'Mostrar senha'.",
                "Insira sua senha de usuário do sistema para visualizar.",
            ],
            "security find-generic-password -ga \"SSID\" | grep \"password:\"",
        ),
        Platform::Android => (
            "Recuperar no Android (10+)",
            [
                "Vá em Configurações > Rede e Internet > Wi-Fi.",
                "Toque na engrenagem ao lado da rede conectada.",
                "Toque em 'Compartilhar' (ícone de QR Code).",
                "A senha pode aparecer em texto abaixo do QR Code.",
                "Se não, tire print e use um leitor de QR no Google Lens.",
            ],
            "Nível de Sistema: Configurações -> Wi-Fi -> QR Code",
        ),
        Platform::Ios => (
            "Recuperar no iOS (16+)",
            [
                "Vá em Ajustes > Wi-Fi.",
                "Toque no ícone '(i)' ao lado da rede conectada.",
                "Toque no campo 'Senha' (protegido por pontos).",
                "Use o FaceID ou TouchID para revelar o texto.",
                "Copie a senha para a área de transferência.",
            ],
            "Ajustes -> Wi-Fi -> Senha (Revelar)",
        ),
    };
    Guide { platform, language: Language::PtBr, title, steps, command }
}

fn guide_en(platform: Platform) -> Guide {
    let (title, steps, command) = match platform {
        Platform::Windows => (
            "Recover on Windows",
            [
                "Open Command Prompt (CMD) as Administrator.",
                "Type: netsh wlan show profile",
                "Find the name of the WiFi network you want.",
                "Type: netsh wlan show profile name=\"NETWORK_NAME\" key=clear",
                "The password appears under 'Key Content'.",
            ],
            "netsh wlan show profile name=\"SSID\" key=clear",
        ),
        Platform::Mac => (
            "Recover on macOS",
            [
                "Open Keychain Access.",
                "Type the WiFi name in the search field.",
                "Double-click the matching network item.",
                "Tick the 'Show password' box.",
                "Enter your macOS user password to reveal it.",
            ],
            "security find-generic-password -ga \"SSID\" | grep \"password:\"",
        ),
        Platform::Android => (
            "Recover on Android (10+)",
            [
                "Go to Settings > Network & Internet > Wi-Fi.",
                "Tap the gear next to the connected network.",
                "Tap 'Share' (QR code icon).",
                "The password may be shown as text below the QR code.",
                "If not, take a screenshot and scan it with Google Lens.",
            ],
            "System level: Settings -> Wi-Fi -> QR Code",
        ),
        Platform::Ios => (
            "Recover on iOS (16+)",
            [
                "Go to Settings > Wi-Fi.",
                "Tap the '(i)' icon next to the connected network.",
                "Tap the 'Password' field (hidden behind dots).",
                "Use FaceID or TouchID to reveal the text.",
                "Copy the password to the clipboard.",
            ],
            "Settings -> Wi-Fi -> Password (Reveal)",
        ),
    };
    Guide { platform, language: Language::EnUs, title, steps, command }
}

#[cfg(test)]
#[path = "extractor_test.rs"]
mod tests;
