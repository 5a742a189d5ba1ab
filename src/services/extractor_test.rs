use super::*;
use crate::state::test_helpers::test_app_state;

#[test]
fn script_has_six_lines_and_ends_at_100() {
    let steps = script();
    let progress: Vec<u8> = steps.iter().map(|s| s.progress).collect();
    assert_eq!(progress, [16, 33, 50, 66, 83, 100]);
    assert!(steps.iter().all(|s| s.delay == LINE_INTERVAL));
    assert_eq!(steps[4].message.as_deref(), Some("> Error: Sandbox restricted by Browser API."));
}

#[tokio::test(start_paused = true)]
async fn run_prints_lines_in_order() {
    let state = test_app_state();
    start(&state).unwrap();
    assert!(matches!(start(&state), Err(SimulatorError::Busy(SimulatorKind::KeyExtraction))));

    tokio::time::sleep(LINE_INTERVAL * 3 + Duration::from_millis(10)).await;
    let mid = state.simulators.get(SimulatorKind::KeyExtraction).unwrap();
    assert_eq!(mid.log.len(), 3);
    assert_eq!(mid.status, RunStatus::Running);

    tokio::time::sleep(LINE_INTERVAL * 3).await;
    let done = state.simulators.get(SimulatorKind::KeyExtraction).unwrap();
    assert_eq!(done.log, TERMINAL_LINES);
    assert_eq!(done.progress, 100);
    assert_eq!(done.status, RunStatus::Succeeded);
}

#[test]
fn guides_carry_platform_commands() {
    assert_eq!(guide(Platform::Windows, Language::PtBr).command, "netsh wlan show profile name=\"SSID\" key=clear");
    assert!(guide(Platform::Mac, Language::EnUs).command.starts_with("security find-generic-password"));
    assert!(guide(Platform::Ios, Language::EnUs).title.contains("iOS (16+)"));
}

#[test]
fn untranslated_languages_fall_back_to_pt_br() {
    let g = guide(Platform::Android, Language::ItIt);
    assert_eq!(g.language, Language::PtBr);
    assert_eq!(g.title, "Recuperar no Android (10+)");
}

#[test]
fn every_guide_has_five_non_empty_steps() {
    for platform in Platform::ALL {
        for lang in [Language::PtBr, Language::EnUs] {
            let g = guide(platform, lang);
            assert!(g.steps.iter().all(|s| !s.is_empty()), "{platform} {lang}");
            assert_eq!(g.platform, platform);
        }
    }
}
