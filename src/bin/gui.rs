#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.

use eframe::{egui, App, Frame};
use image::GenericImageView;
use length_unit_converter::{
    app, config,
    conversion::ConversionError,
    form::ConverterForm,
    i18n::{self, keys},
    units::LengthUnit,
};
use rfd::FileDialog;
use std::{env, fs, path::Path};

fn main() -> Result<(), eframe::Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // CLI 언어 옵션 처리: --lang xx 또는 --lang=xx (xx: auto/en-us/ko-kr/ko/de-de)
    let mut cli_lang: Option<String> = None;
    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        let a = &args[i];
        if let Some(val) = a.strip_prefix("--lang=") {
            cli_lang = Some(val.to_string());
        } else if (a == "--lang" || a == "-L") && i + 1 < args.len() {
            cli_lang = Some(args[i + 1].clone());
            i += 1;
        }
        i += 1;
    }

    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size(egui::vec2(420.0, 460.0))
        .with_transparent(true);
    if let Some(icon) = load_app_icon() {
        viewport = viewport.with_icon(icon);
    }
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    let app_cfg = match config::load_or_default() {
        Ok(cfg) => cfg,
        Err(e) => {
            log::warn!("config unavailable, using defaults: {e}");
            config::Config::default()
        }
    };
    eframe::run_native(
        "Length Unit Converter",
        options,
        Box::new(move |cc| {
            if let Err(e) = setup_fonts(&cc.egui_ctx) {
                log::warn!("font setup: {e}");
            }
            Box::new(GuiApp::new(app_cfg.clone(), cli_lang.as_deref()))
        }),
    )
}

fn load_app_icon() -> Option<egui::IconData> {
    let search = ["icon.png", "assets/icon.png", "../assets/icon.png"];
    let path = search.iter().find(|p| Path::new(*p).exists())?;
    let bytes = fs::read(path).ok()?;
    let img = image::load_from_memory(&bytes).ok()?;
    let rgba = img.to_rgba8();
    let (w, h) = img.dimensions();
    Some(egui::IconData {
        rgba: rgba.into_raw(),
        width: w,
        height: h,
    })
}

fn apply_font_bytes(ctx: &egui::Context, bytes: Vec<u8>, name: &str) {
    let mut fonts = egui::FontDefinitions::default();
    let font_name = name.to_string();
    fonts
        .font_data
        .insert(font_name.clone(), egui::FontData::from_owned(bytes));
    // 기본 폰트 뒤에 두어 라틴 문자는 기본 폰트로, 한글만 대체 폰트로 그린다.
    fonts
        .families
        .entry(egui::FontFamily::Proportional)
        .or_default()
        .push(font_name.clone());
    fonts
        .families
        .entry(egui::FontFamily::Monospace)
        .or_default()
        .push(font_name);
    ctx.set_fonts(fonts);
}

/// 한글을 표시하기 위해 시스템 폰트를 대체 폰트로 등록한다.
/// 1) assets/fonts/ 아래 프로젝트 폰트
/// 2) OS별 시스템 폰트(맑은 고딕, Apple SD Gothic Neo, Noto Sans CJK 등)
/// 3) 모두 실패 시 Err를 반환하고 기본 폰트를 유지한다.
fn setup_fonts(ctx: &egui::Context) -> Result<(), String> {
    let mut candidates: Vec<std::path::PathBuf> = vec![
        "assets/fonts/malgun.ttf".into(),
        "assets/fonts/NotoSansKR-Regular.ttf".into(),
    ];
    if let Some(windir) = env::var_os("WINDIR") {
        let fonts = Path::new(&windir).join("Fonts");
        for cand in ["malgun.ttf", "gulim.ttc"] {
            candidates.push(fonts.join(cand));
        }
    }
    candidates.push("/System/Library/Fonts/AppleSDGothicNeo.ttc".into());
    candidates.push("/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc".into());
    candidates.push("/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc".into());
    candidates.push("/usr/share/fonts/truetype/nanum/NanumGothic.ttf".into());

    for p in candidates {
        if p.exists() {
            let bytes = fs::read(&p)
                .map_err(|e| format!("Failed to read font file ({}): {e}", p.display()))?;
            apply_font_bytes(ctx, bytes, "cjk_font");
            log::debug!("font loaded: {}", p.display());
            return Ok(());
        }
    }
    Err("Korean font not found; Hangul labels may not render.".into())
}

/// 설정 파일의 언어 코드를 언어 선택 콤보의 항목으로 맞춘다.
fn lang_choice(code: &str) -> &'static str {
    let c = code.trim().to_lowercase();
    if c.starts_with("ko") {
        "ko-kr"
    } else if c.starts_with("en") {
        "en-us"
    } else if c.starts_with("de") {
        "de-de"
    } else {
        "auto"
    }
}

struct GuiApp {
    config: config::Config,
    tr: i18n::Translator,
    form: ConverterForm,
    /// 잘못된 입력 경고창. 열려 있는 동안 폼은 비활성화된다.
    show_invalid_alert: bool,
    show_settings_modal: bool,
    show_help_modal: bool,
    lang_input: String,
    lang_pack_dir_input: String,
    settings_status: Option<String>,
    window_alpha: f32,
}

impl GuiApp {
    /// `cli_lang`은 이번 실행에만 쓰고 설정 파일에는 남기지 않는다.
    fn new(config: config::Config, cli_lang: Option<&str>) -> Self {
        let tr = match cli_lang {
            Some(code) => {
                let lang = i18n::resolve_language(code, Some(config.language.as_str()));
                i18n::Translator::new_with_pack(&lang, config.language_pack_dir.as_deref())
            }
            None => app::translator_for(&config),
        };
        log::debug!("GUI language resolved: {}", tr.language_code());
        Self {
            form: ConverterForm::from_config(&config),
            tr,
            show_invalid_alert: false,
            show_settings_modal: false,
            show_help_modal: false,
            lang_input: lang_choice(&config.language).to_string(),
            lang_pack_dir_input: config.language_pack_dir.clone().unwrap_or_default(),
            settings_status: None,
            window_alpha: config.clamped_alpha(),
            config,
        }
    }

    /// 변환 버튼 동작. 입력이 유효하지 않으면 경고창을 띄우고 이전 결과를 유지한다.
    fn run_conversion(&mut self) {
        match self.form.submit() {
            Ok(_) => {}
            Err(ConversionError::InvalidMagnitude(_)) => self.show_invalid_alert = true,
            Err(e) => log::error!("conversion failed: {e}"),
        }
    }

    fn result_text(&self) -> Option<String> {
        self.form.result_label(|u| self.tr.unit_name(u))
    }

    fn unit_combo(ui: &mut egui::Ui, id: &str, value: &mut LengthUnit, tr: &i18n::Translator) {
        egui::ComboBox::from_id_source(id)
            .selected_text(tr.unit_name(*value).into_owned())
            .width(200.0)
            .show_ui(ui, |ui| {
                for unit in LengthUnit::ALL {
                    ui.selectable_value(value, unit, tr.unit_name(unit).into_owned());
                }
            });
    }

    fn ui_converter(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        let txt = |key: &str| tr.t(key).into_owned();
        ui.vertical_centered(|ui| {
            ui.add_space(12.0);
            ui.heading(txt(keys::APP_TITLE));
            ui.add_space(16.0);
        });
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.vertical(|ui| {
                let edit = ui.add(
                    egui::TextEdit::singleline(&mut self.form.input)
                        .hint_text(txt(keys::CONVERT_PLACEHOLDER))
                        .desired_width(f32::INFINITY),
                );
                let submitted =
                    edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                ui.add_space(8.0);
                egui::Grid::new("conv_grid")
                    .num_columns(2)
                    .spacing([12.0, 8.0])
                    .show(ui, |ui| {
                        ui.label(txt(keys::LABEL_FROM));
                        Self::unit_combo(ui, "conv_from", &mut self.form.from, &tr);
                        ui.end_row();
                        ui.label(txt(keys::LABEL_TO));
                        Self::unit_combo(ui, "conv_to", &mut self.form.to, &tr);
                        ui.end_row();
                    });
                ui.add_space(10.0);
                let button = egui::Button::new(txt(keys::CONVERT_BUTTON))
                    .min_size(egui::vec2(ui.available_width(), 32.0));
                if ui.add(button).clicked() || submitted {
                    self.run_conversion();
                }
            });
        });
        if let Some(res) = self.result_text() {
            ui.add_space(16.0);
            ui.vertical_centered(|ui| {
                ui.label(egui::RichText::new(res).strong().size(18.0));
            });
        }
    }

    fn ui_invalid_alert(&mut self, ctx: &egui::Context) {
        let tr = self.tr.clone();
        let txt = |key: &str| tr.t(key).into_owned();
        let mut acknowledged = false;
        egui::Window::new(txt(keys::ALERT_INVALID_TITLE))
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.label(txt(keys::ALERT_INVALID_BODY));
                ui.add_space(8.0);
                if ui.button(txt(keys::ALERT_OK)).clicked() {
                    acknowledged = true;
                }
            });
        if acknowledged {
            self.show_invalid_alert = false;
        }
    }

    fn ui_settings(&mut self, ctx: &egui::Context) {
        let tr = self.tr.clone();
        let txt = |key: &str| tr.t(key).into_owned();
        let mut open = self.show_settings_modal;
        egui::Window::new(txt(keys::SETTINGS_TITLE))
            .collapsible(false)
            .resizable(true)
            .open(&mut open)
            .show(ctx, |ui| {
                egui::Grid::new("settings_grid")
                    .num_columns(2)
                    .spacing([12.0, 8.0])
                    .show(ui, |ui| {
                        ui.label(txt(keys::SETTINGS_DEFAULT_FROM));
                        Self::unit_combo(ui, "default_from", &mut self.config.default_from, &tr);
                        ui.end_row();
                        ui.label(txt(keys::SETTINGS_DEFAULT_TO));
                        Self::unit_combo(ui, "default_to", &mut self.config.default_to, &tr);
                        ui.end_row();
                        ui.label(txt(keys::SETTINGS_DECIMALS));
                        ui.add(egui::Slider::new(
                            &mut self.config.decimals,
                            0..=config::MAX_DECIMALS,
                        ));
                        ui.end_row();
                        ui.label(txt(keys::SETTINGS_ALPHA));
                        ui.add(egui::Slider::new(&mut self.window_alpha, 0.3..=1.0));
                        ui.end_row();
                        ui.label(txt(keys::SETTINGS_LANGUAGE));
                        egui::ComboBox::from_id_source("lang_choice")
                            .selected_text(&self.lang_input)
                            .show_ui(ui, |ui| {
                                ui.selectable_value(
                                    &mut self.lang_input,
                                    "auto".into(),
                                    txt(keys::SETTINGS_LANGUAGE_AUTO),
                                );
                                ui.selectable_value(&mut self.lang_input, "en-us".into(), "English (US)");
                                ui.selectable_value(&mut self.lang_input, "ko-kr".into(), "한국어");
                                ui.selectable_value(&mut self.lang_input, "de-de".into(), "Deutsch");
                            });
                        ui.end_row();
                        ui.label(txt(keys::SETTINGS_PACK_DIR));
                        ui.horizontal(|ui| {
                            ui.text_edit_singleline(&mut self.lang_pack_dir_input);
                            if ui.button(txt(keys::SETTINGS_BROWSE)).clicked() {
                                if let Some(dir) = FileDialog::new().pick_folder() {
                                    self.lang_pack_dir_input = dir.display().to_string();
                                }
                            }
                        });
                        ui.end_row();
                    });
                ui.separator();
                if ui.button(txt(keys::SETTINGS_SAVE)).clicked() {
                    self.apply_settings();
                }
                if let Some(msg) = &self.settings_status {
                    ui.label(msg);
                }
            });
        self.show_settings_modal = open;
    }

    /// 설정 창의 값을 설정에 반영하고 저장한다. 번역기와 폼 기본값도 즉시 갱신한다.
    fn apply_settings(&mut self) {
        let dir = self.lang_pack_dir_input.trim();
        let pack_dir = (!dir.is_empty()).then(|| dir.to_string());
        let lang_changed = lang_choice(&self.config.language) != self.lang_input;
        if lang_changed || self.config.language_pack_dir != pack_dir {
            self.config.language = self.lang_input.clone();
            self.config.language_pack_dir = pack_dir;
            self.tr = app::translator_for(&self.config);
        }
        self.config.window_alpha = self.window_alpha;
        self.form.decimals = self.config.display_decimals();
        if self.form.result().is_none() {
            self.form.from = self.config.default_from;
            self.form.to = self.config.default_to;
        }
        self.settings_status = Some(match self.config.save() {
            Ok(()) => self.tr.t(keys::SETTINGS_SAVED).into_owned(),
            Err(e) => format!("{}: {e}", self.tr.t(keys::ERROR_PREFIX)),
        });
    }

    fn ui_help(&mut self, ctx: &egui::Context) {
        let tr = self.tr.clone();
        let txt = |key: &str| tr.t(key).into_owned();
        egui::Window::new(txt(keys::HELP_TITLE))
            .collapsible(false)
            .resizable(true)
            .open(&mut self.show_help_modal)
            .show(ctx, |ui| {
                ui.label(txt(keys::HELP_BODY));
                ui.label(txt(keys::HELP_INPUT_RULE));
                ui.separator();
                egui::Grid::new("factor_grid").striped(true).show(ui, |ui| {
                    for (unit, factor) in length_unit_converter::units::conversion_table() {
                        ui.label(tr.unit_name(unit).into_owned());
                        ui.label(format!("1 {} = {factor} m", unit.symbol()));
                        ui.end_row();
                    }
                });
            });
    }
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        let mut style = (*ctx.style()).clone();
        style.interaction.selectable_labels = false;
        style.visuals.window_fill = style.visuals.window_fill.linear_multiply(self.window_alpha);
        style.visuals.panel_fill = style.visuals.panel_fill.linear_multiply(self.window_alpha);
        ctx.set_style(style);

        let tr = self.tr.clone();
        let txt = |key: &str| tr.t(key).into_owned();
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.add_enabled_ui(!self.show_invalid_alert, |ui| {
                ui.horizontal(|ui| {
                    if ui.button(txt(keys::SETTINGS_TITLE)).clicked() {
                        self.show_settings_modal = true;
                    }
                    if ui.button(txt(keys::HELP_TITLE)).clicked() {
                        self.show_help_modal = true;
                    }
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_enabled_ui(!self.show_invalid_alert, |ui| {
                self.ui_converter(ui);
            });
        });

        if self.show_settings_modal {
            self.ui_settings(ctx);
        }
        if self.show_help_modal {
            self.ui_help(ctx);
        }
        if self.show_invalid_alert {
            self.ui_invalid_alert(ctx);
        }
    }
}
