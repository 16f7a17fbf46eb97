// ==========================================
// 汽车工厂生产线 - 控制台菜单
// ==========================================
// 职责: 交互式菜单，收集输入后调用 FactoryApi
// 输入: 任意 BufRead (按空白分隔的记号)
// 输出: 任意 Write；文案走 i18n
// 红线: 输入解析失败只提示并回到菜单，不影响工厂状态
// ==========================================

use std::collections::VecDeque;
use std::io::{BufRead, Write};
use std::str::FromStr;

use anyhow::Context;
use serde_json::Value as JsonValue;
use thiserror::Error;

use crate::api::{ApiError, FactoryApi};
use crate::domain::car::CarSpec;
use crate::domain::engine::EngineSpec;
use crate::domain::error::ConfigurationError;
use crate::domain::sheet::{Describable, TechnicalSheet};
use crate::domain::types::EngineRequirement;
use crate::i18n::{t, t_with_args};
use crate::production::{CarOrder, EngineOrder};

/// 控制台输入层面的错误 (不含业务错误)
#[derive(Debug, Error, PartialEq)]
enum InputError {
    #[error("输入已结束")]
    Closed,

    #[error("输入无效: {0}")]
    Invalid(String),
}

/// 菜单选项
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    AddEngine,
    AssembleCar,
    AvailableEngines,
    HighSpeedCars,
    LargestOmnibus,
    TechnicalSheets,
    Decommission,
    Reassembled,
    PlanCompliance,
    Profit,
    Exit,
}

impl MenuOption {
    pub fn from_number(n: u32) -> Option<Self> {
        match n {
            1 => Some(MenuOption::AddEngine),
            2 => Some(MenuOption::AssembleCar),
            3 => Some(MenuOption::AvailableEngines),
            4 => Some(MenuOption::HighSpeedCars),
            5 => Some(MenuOption::LargestOmnibus),
            6 => Some(MenuOption::TechnicalSheets),
            7 => Some(MenuOption::Decommission),
            8 => Some(MenuOption::Reassembled),
            9 => Some(MenuOption::PlanCompliance),
            10 => Some(MenuOption::Profit),
            11 => Some(MenuOption::Exit),
            _ => None,
        }
    }
}

const MENU_KEYS: [&str; 11] = [
    "menu.add_engine",
    "menu.assemble_car",
    "menu.available_engines",
    "menu.high_speed_cars",
    "menu.largest_omnibus",
    "menu.technical_sheets",
    "menu.decommission",
    "menu.reassembled",
    "menu.plan_compliance",
    "menu.profit",
    "menu.exit",
];

// ==========================================
// Console - 控制台
// ==========================================
pub struct Console<'a, R, W> {
    api: &'a FactoryApi,
    input: R,
    output: W,
    tokens: VecDeque<String>,
}

impl<'a, R: BufRead, W: Write> Console<'a, R, W> {
    pub fn new(api: &'a FactoryApi, input: R, output: W) -> Self {
        Self {
            api,
            input,
            output,
            tokens: VecDeque::new(),
        }
    }

    /// 交还输出端 (测试中读取输出)
    pub fn into_output(self) -> W {
        self.output
    }

    /// 菜单主循环；选择退出或输入结束时返回
    pub fn run(&mut self) -> anyhow::Result<()> {
        loop {
            self.print_menu()?;

            let option = match self.read_parsed::<u32>() {
                Ok(n) => MenuOption::from_number(n),
                Err(err) => match err.downcast_ref::<InputError>() {
                    Some(InputError::Closed) => {
                        writeln!(self.output)?;
                        writeln!(self.output, "{}", t("message.input_closed"))?;
                        return Ok(());
                    }
                    Some(InputError::Invalid(_)) => None,
                    None => return Err(err),
                },
            };

            let Some(option) = option else {
                writeln!(self.output, "{}", t("menu.invalid_option"))?;
                continue;
            };

            if option == MenuOption::Exit {
                writeln!(self.output, "{}", t("menu.bye"))?;
                return Ok(());
            }

            match self.dispatch(option) {
                Ok(()) => {}
                Err(err) => match err.downcast_ref::<InputError>() {
                    Some(InputError::Closed) => {
                        writeln!(self.output)?;
                        writeln!(self.output, "{}", t("message.input_closed"))?;
                        return Ok(());
                    }
                    Some(InputError::Invalid(raw)) => {
                        let msg = t_with_args("message.invalid_number", &[("input", raw)]);
                        writeln!(self.output, "{}", msg)?;
                    }
                    None => return Err(err),
                },
            }
        }
    }

    fn dispatch(&mut self, option: MenuOption) -> anyhow::Result<()> {
        tracing::debug!(?option, "菜单选项");
        match option {
            MenuOption::AddEngine => self.add_engine(),
            MenuOption::AssembleCar => self.assemble_car(),
            MenuOption::AvailableEngines => self.show_available_engines(),
            MenuOption::HighSpeedCars => self.show_high_speed_cars(),
            MenuOption::LargestOmnibus => self.show_largest_omnibus(),
            MenuOption::TechnicalSheets => self.show_technical_sheets(),
            MenuOption::Decommission => self.decommission(),
            MenuOption::Reassembled => self.show_reassembled(),
            MenuOption::PlanCompliance => self.show_plan_compliance(),
            MenuOption::Profit => self.show_profit(),
            MenuOption::Exit => Ok(()),
        }
    }

    // ==========================================
    // 菜单动作
    // ==========================================

    fn add_engine(&mut self) -> anyhow::Result<()> {
        let kind: u32 = self.prompt_parsed("prompt.engine_kind")?;
        if !(1..=3).contains(&kind) {
            writeln!(self.output, "{}", t("message.invalid_kind"))?;
            return Ok(());
        }

        let code = self.prompt_token("prompt.code")?;
        let release_date = self.prompt_token("prompt.release_date")?;
        let specialist = self.prompt_token("prompt.specialist")?;
        let reassembly_count: u32 = self.prompt_parsed("prompt.reassembly_count")?;

        let spec = match kind {
            1 => EngineSpec::HighPerformance {
                max_rpm: self.prompt_parsed("prompt.max_rpm")?,
                fuel_efficiency_km_l: self.prompt_parsed("prompt.fuel_efficiency")?,
            },
            2 => EngineSpec::Force {
                horsepower: self.prompt_parsed("prompt.horsepower")?,
            },
            _ => EngineSpec::Work {
                handcrafted: self.prompt_flag("prompt.handcrafted")?,
            },
        };

        let order = EngineOrder {
            code,
            release_date,
            specialist,
            reassembly_count,
            spec,
        };
        match self.api.add_engine(order) {
            Ok(code) => {
                let msg = t_with_args("message.engine_added", &[("code", &code)]);
                writeln!(self.output, "{}", msg)?;
            }
            Err(err) => self.print_api_error(&err)?,
        }
        Ok(())
    }

    fn assemble_car(&mut self) -> anyhow::Result<()> {
        let kind: u32 = self.prompt_parsed("prompt.car_kind")?;
        if !(1..=4).contains(&kind) {
            writeln!(self.output, "{}", t("message.invalid_kind"))?;
            return Ok(());
        }

        let release_date = self.prompt_token("prompt.release_date")?;
        let top_speed_kmh: f64 = self.prompt_parsed("prompt.top_speed")?;

        let spec = match kind {
            1 => CarSpec::Formula1 {
                body_weight_kg: self.prompt_parsed("prompt.body_weight")?,
            },
            2 => CarSpec::Omnibus {
                doors: self.prompt_parsed("prompt.doors")?,
            },
            3 => CarSpec::Sport {
                seats: self.prompt_parsed("prompt.seats")?,
                gear_speeds: self.prompt_parsed("prompt.gear_speeds")?,
                universal_shifter: self.prompt_flag("prompt.universal_shifter")?,
            },
            _ => CarSpec::DeLujo {
                seats: self.prompt_parsed("prompt.seats")?,
                upholstery_cost: self.prompt_parsed("prompt.upholstery_cost")?,
            },
        };
        let car_kind = spec.kind();

        let order = CarOrder {
            release_date,
            top_speed_kmh,
            spec,
        };
        match self.api.assemble_car(order) {
            Ok(id) => {
                let kind_label = t(&format!("kind.{}", car_kind.as_str()));
                let msg = t_with_args("message.car_assembled", &[("kind", &kind_label), ("id", &id)]);
                writeln!(self.output, "{}", msg)?;
            }
            Err(err) => self.print_api_error(&err)?,
        }
        Ok(())
    }

    fn show_available_engines(&mut self) -> anyhow::Result<()> {
        let available = self.api.list_available_engines()?;
        for pool in &available.pools {
            let kind_label = t(&format!("kind.{}", pool.kind.as_str()));
            let count = pool.count.to_string();
            let msg = t_with_args("message.pool_count", &[("kind", &kind_label), ("count", &count)]);
            writeln!(self.output, "{}", msg)?;
            for engine in &pool.engines {
                self.print_sheet(&engine.technical_sheet())?;
                writeln!(self.output, "{}", t("common.separator"))?;
            }
        }
        Ok(())
    }

    fn show_high_speed_cars(&mut self) -> anyhow::Result<()> {
        let threshold = self.api.config().high_speed_threshold_kmh.to_string();
        let msg = t_with_args("message.high_speed_title", &[("threshold", &threshold)]);
        writeln!(self.output, "{}", msg)?;

        for car in self.api.high_speed_cars(None)? {
            self.print_sheet(&car.technical_sheet())?;
            writeln!(self.output, "{}", t("common.separator"))?;
        }
        Ok(())
    }

    fn show_largest_omnibus(&mut self) -> anyhow::Result<()> {
        match self.api.largest_omnibus()? {
            Some(car) => {
                writeln!(self.output, "{}", t("message.largest_omnibus_title"))?;
                self.print_sheet(&car.technical_sheet())?;
            }
            None => writeln!(self.output, "{}", t("message.no_omnibus"))?,
        }
        Ok(())
    }

    fn show_technical_sheets(&mut self) -> anyhow::Result<()> {
        let sheets = self.api.technical_sheets()?;
        if sheets.is_empty() {
            writeln!(self.output, "{}", t("message.no_cars"))?;
        }
        for sheet in &sheets {
            self.print_sheet(sheet)?;
            writeln!(self.output, "{}", t("common.separator"))?;
        }
        Ok(())
    }

    fn decommission(&mut self) -> anyhow::Result<()> {
        let code = self.prompt_token("prompt.decommission_code")?;
        match self.api.decommission_car(&code) {
            Ok(engine) => {
                let count = engine.reassembly_count().to_string();
                let msg = t_with_args(
                    "message.decommissioned",
                    &[("code", engine.code()), ("count", &count)],
                );
                writeln!(self.output, "{}", msg)?;
            }
            Err(err) => self.print_api_error(&err)?,
        }
        Ok(())
    }

    fn show_reassembled(&mut self) -> anyhow::Result<()> {
        writeln!(self.output, "{}", t("message.reassembled_title"))?;

        let impacts = self.api.reassembled_price_impact()?;
        let cars = self.api.list_assembled_cars()?;
        for impact in &impacts {
            if let Some(car) = cars.iter().find(|car| car.id() == impact.car_id) {
                self.print_sheet(&car.technical_sheet())?;
            }
            let delta = impact.delta.to_string();
            let msg = t_with_args("message.price_decrease", &[("delta", &delta)]);
            writeln!(self.output, "{}", msg)?;
            writeln!(self.output, "{}", t("common.separator"))?;
        }
        Ok(())
    }

    fn show_plan_compliance(&mut self) -> anyhow::Result<()> {
        let compliance = self.api.plan_compliance()?;
        let engine_percent = compliance.engine_percent.to_string();
        let car_percent = compliance.car_percent.to_string();
        writeln!(
            self.output,
            "{}",
            t_with_args("message.engine_plan", &[("percent", &engine_percent)])
        )?;
        writeln!(
            self.output,
            "{}",
            t_with_args("message.car_plan", &[("percent", &car_percent)])
        )?;
        Ok(())
    }

    fn show_profit(&mut self) -> anyhow::Result<()> {
        writeln!(self.output, "{}", t("message.profit_title"))?;
        for (kind, profit) in self.api.profit_by_variant()? {
            let kind_label = t(&format!("kind.{}", kind.as_str()));
            let profit = profit.to_string();
            let msg = t_with_args("message.profit_line", &[("kind", &kind_label), ("profit", &profit)]);
            writeln!(self.output, "{}", msg)?;
        }
        Ok(())
    }

    // ==========================================
    // 输出辅助
    // ==========================================

    fn print_menu(&mut self) -> anyhow::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "{}", t("menu.title"))?;
        for key in MENU_KEYS {
            writeln!(self.output, "{}", t(key))?;
        }
        write!(self.output, "{}", t("menu.choose"))?;
        self.output.flush().context("刷新控制台输出失败")?;
        Ok(())
    }

    fn print_api_error(&mut self, err: &ApiError) -> anyhow::Result<()> {
        tracing::warn!(error = %err, "操作失败");
        let reason = api_error_message(err);
        writeln!(self.output, "{}", t_with_args("message.error", &[("reason", &reason)]))?;
        Ok(())
    }

    fn print_sheet(&mut self, sheet: &TechnicalSheet) -> anyhow::Result<()> {
        let kind_label = t(&format!("kind.{}", sheet.kind));
        writeln!(self.output, "{}", t_with_args("sheet.title", &[("kind", &kind_label)]))?;
        self.print_fields(sheet)?;

        if let Some(engine) = &sheet.engine {
            writeln!(self.output, "{}", t("sheet.engine_title"))?;
            self.print_fields(engine)?;
        }
        Ok(())
    }

    fn print_fields(&mut self, sheet: &TechnicalSheet) -> anyhow::Result<()> {
        for field in &sheet.fields {
            let label = t(&format!("sheet.{}", field.key));
            writeln!(self.output, "{}: {}", label, format_value(&field.value))?;
        }
        Ok(())
    }

    // ==========================================
    // 输入辅助
    // ==========================================

    fn next_token(&mut self) -> anyhow::Result<String> {
        while self.tokens.is_empty() {
            let mut line = String::new();
            let read = self
                .input
                .read_line(&mut line)
                .context("读取控制台输入失败")?;
            if read == 0 {
                return Err(InputError::Closed.into());
            }
            self.tokens
                .extend(line.split_whitespace().map(str::to_string));
        }
        self.tokens
            .pop_front()
            .ok_or_else(|| InputError::Closed.into())
    }

    fn read_parsed<T: FromStr>(&mut self) -> anyhow::Result<T> {
        let raw = self.next_token()?;
        raw.parse::<T>()
            .map_err(|_| InputError::Invalid(raw).into())
    }

    fn prompt(&mut self, key: &str) -> anyhow::Result<()> {
        write!(self.output, "{}", t(key))?;
        self.output.flush().context("刷新控制台输出失败")?;
        Ok(())
    }

    fn prompt_token(&mut self, key: &str) -> anyhow::Result<String> {
        self.prompt(key)?;
        self.next_token()
    }

    fn prompt_parsed<T: FromStr>(&mut self, key: &str) -> anyhow::Result<T> {
        self.prompt(key)?;
        self.read_parsed()
    }

    /// 1 = 是, 0 = 否
    fn prompt_flag(&mut self, key: &str) -> anyhow::Result<bool> {
        self.prompt(key)?;
        let raw = self.next_token()?;
        match raw.as_str() {
            "1" => Ok(true),
            "0" => Ok(false),
            _ => Err(InputError::Invalid(raw).into()),
        }
    }
}

// ==========================================
// 错误文案
// ==========================================

/// ApiError 的本地化描述；内部错误细节只进日志
fn api_error_message(err: &ApiError) -> String {
    match err {
        ApiError::EngineUnavailable { requirement } => {
            let engine = requirement_label(requirement);
            t_with_args("error.engine_unavailable", &[("engine", &engine)])
        }
        ApiError::InvalidConfiguration(reason) => configuration_error_message(reason),
        ApiError::NotFound { entity, id } => {
            let entity = t(&format!("entity.{}", entity));
            t_with_args("error.not_found", &[("entity", &entity), ("id", id)])
        }
        ApiError::InvalidInput(reason) => t_with_args("error.invalid_input", &[("reason", reason)]),
        ApiError::InternalError(_) | ApiError::Other(_) => t("error.internal"),
    }
}

fn configuration_error_message(err: &ConfigurationError) -> String {
    match err {
        ConfigurationError::HorsepowerOutOfRange { value, min, max } => t_with_args(
            "error.horsepower_out_of_range",
            &[
                ("value", &value.to_string()),
                ("min", &min.to_string()),
                ("max", &max.to_string()),
            ],
        ),
        ConfigurationError::SeatsOutOfRange { value, min, max } => t_with_args(
            "error.seats_out_of_range",
            &[
                ("value", &value.to_string()),
                ("min", &min.to_string()),
                ("max", &max.to_string()),
            ],
        ),
        ConfigurationError::EngineMismatch { car, engine } => {
            let car = t(&format!("kind.{}", car.as_str()));
            let engine = t(&format!("kind.{}", engine.as_str()));
            t_with_args("error.engine_mismatch", &[("car", &car), ("engine", &engine)])
        }
        ConfigurationError::EngineNotHandcrafted { engine_code } => {
            t_with_args("error.engine_not_handcrafted", &[("code", engine_code)])
        }
        ConfigurationError::NonPositive { field, value } => {
            let field = t(&format!("sheet.{}", field));
            t_with_args(
                "error.non_positive",
                &[("field", &field), ("value", &value.to_string())],
            )
        }
    }
}

fn requirement_label(requirement: &EngineRequirement) -> String {
    match requirement {
        EngineRequirement::Latest(kind) => t(&format!("kind.{}", kind.as_str())),
        EngineRequirement::Handcrafted => t("error.handcrafted_engine"),
    }
}

fn format_value(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        JsonValue::Bool(true) => t("common.flag_on"),
        JsonValue::Bool(false) => t("common.flag_off"),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::FactoryApi;
    use crate::config::FactoryConfig;
    use crate::domain::types::{CarKind, EngineKind};
    use crate::i18n::set_locale;
    use crate::i18n::tests::LOCALE_TEST_LOCK;
    use crate::repository::ActionLogRepository;
    use std::io::Cursor;
    use std::sync::Arc;

    fn run_script(api: &FactoryApi, script: &str) -> String {
        let mut console = Console::new(api, Cursor::new(script.as_bytes().to_vec()), Vec::new());
        console.run().unwrap();
        String::from_utf8(console.into_output()).unwrap()
    }

    fn api() -> FactoryApi {
        FactoryApi::new(FactoryConfig::default(), Arc::new(ActionLogRepository::new()))
    }

    #[test]
    fn test_add_engine_and_assemble_omnibus() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("en");
        let api = api();

        let output = run_script(
            &api,
            "1 2 FO0000000095 01/01/2024 Ana 0 95\n\
             2 2 02/01/2024 90 3\n\
             5\n\
             11\n",
        );
        set_locale("zh-CN");

        assert!(output.contains("Engine FO0000000095 added."));
        assert!(output.contains("Omnibus assembled"));
        assert!(output.contains("Largest-capacity omnibus:"));
        assert!(output.contains("Seats: 9"));
        assert!(output.contains("Exiting..."));
        assert_eq!(api.list_assembled_cars().unwrap().len(), 1);
    }

    #[test]
    fn test_invalid_input_returns_to_menu() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("en");
        let api = api();

        let output = run_script(&api, "abc\n42\n1 2 FO1 01/01/2024 Ana 0 lots\n11\n");
        set_locale("zh-CN");

        assert!(output.contains("Invalid option. Try again."));
        assert!(output.contains("Invalid input: lots"));
        assert_eq!(api.list_available_engines().unwrap().total(), 0);
    }

    #[test]
    fn test_api_error_is_reported() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("en");
        let api = api();

        let output = run_script(&api, "1 2 FO1 01/01/2024 Ana 0 79\n7 NOPE\n11\n");
        set_locale("zh-CN");

        assert_eq!(output.matches("Operation failed").count(), 2);
        assert!(output.contains(
            "Operation failed: Horsepower 79 is outside the allowed range [80, 4000]."
        ));
        assert!(output.contains("Operation failed: No car with that engine found: NOPE"));
    }

    #[test]
    fn test_api_errors_follow_locale() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        let api = api();
        let script = "2 4 02/01/2024 120 3 100
2 1 02/01/2024 300 0
11
";

        set_locale("en");
        let english = run_script(&api, script);
        set_locale("zh-CN");
        let chinese = run_script(&api, script);

        assert!(english.contains("Operation failed: No handcrafted work engine available."));
        assert!(english.contains("Operation failed: No High performance engine available."));
        assert!(chinese.contains("操作失败: 没有可用的手工打造的工作型发动机。"));
        assert!(!english.contains("无可用发动机"), "英文界面不应出现中文错误原因");
    }

    #[test]
    fn test_configuration_error_messages() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("en");

        let mismatch = configuration_error_message(&ConfigurationError::EngineMismatch {
            car: CarKind::Formula1,
            engine: EngineKind::Force,
        });
        let non_positive = configuration_error_message(&ConfigurationError::NonPositive {
            field: "body_weight_kg",
            value: 0.0,
        });
        let internal = api_error_message(&ApiError::InternalError("锁中毒".to_string()));
        set_locale("zh-CN");

        assert_eq!(mismatch, "A Formula1 cannot be built with a Force engine.");
        assert_eq!(non_positive, "Body weight (kg) must be a positive number (got 0).");
        assert_eq!(internal, "Internal error, see the log.");
    }

    #[test]
    fn test_end_of_input_stops_loop() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("en");
        let api = api();

        let output = run_script(&api, "9\n");
        set_locale("zh-CN");

        assert!(output.contains("Engine plan compliance: 0%"));
        assert!(output.contains("Input closed."));
    }

    #[test]
    fn test_menu_option_numbers() {
        assert_eq!(MenuOption::from_number(1), Some(MenuOption::AddEngine));
        assert_eq!(MenuOption::from_number(11), Some(MenuOption::Exit));
        assert_eq!(MenuOption::from_number(0), None);
        assert_eq!(MenuOption::from_number(12), None);
    }
}
