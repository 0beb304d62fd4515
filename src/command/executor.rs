//! Command execution - validates a command and mutates the state

use rand::{Rng, RngCore};

use crate::command::{Command, CommandOutcome, RejectReason};
use crate::core::config::SimulationConfig;
use crate::core::types::{clamp_percent, Component, Severity, Tick};
use crate::scenario::prices::{PriceTable, PricedAction};
use crate::simulation::events::{EventKind, EventLog};
use crate::simulation::state::SimulationState;

/// Highest purchasable coolant pump level
pub const MAX_PUMP_LEVEL: u8 = 5;

/// Everything a command may read or touch
pub struct CommandContext<'a> {
    pub tick: Tick,
    pub state: &'a mut SimulationState,
    pub config: &'a SimulationConfig,
    pub prices: &'a PriceTable,
    pub rng: &'a mut dyn RngCore,
    pub events: &'a mut EventLog,
}

impl CommandContext<'_> {
    fn info(&mut self, kind: EventKind, title: impl Into<String>, message: impl Into<String>) {
        self.events.emit(self.tick, kind, Severity::Info, title, message);
    }

    fn reject(&mut self, reason: RejectReason, message: impl Into<String>) -> CommandOutcome {
        let (kind, title) = if reason.is_insufficient_resource() {
            (EventKind::InsufficientResource, "INSUFFICIENT FUNDS")
        } else {
            (EventKind::Rejected, "COMMAND REJECTED")
        };
        let message = message.into();
        tracing::debug!(tick = self.tick, %reason, %message, "Command rejected");
        self.events.emit(self.tick, kind, Severity::Warning, title, message);
        CommandOutcome::Rejected(reason)
    }

    /// Deduct `cost` from operating cash or reject
    fn pay_cash(&mut self, cost: f64, what: &str) -> Result<(), CommandOutcome> {
        let cash = self.state.finance.operating_cash;
        if cash < cost {
            return Err(self.reject(
                RejectReason::InsufficientCash,
                format!("{} costs ${:.0}, cash on hand ${:.0}", what, cost, cash),
            ));
        }
        self.state.finance.operating_cash = cash - cost;
        Ok(())
    }
}

/// Executes player commands against the state
pub struct CommandExecutor;

impl CommandExecutor {
    pub fn execute(ctx: &mut CommandContext<'_>, command: &Command) -> CommandOutcome {
        if ctx.state.is_game_over() {
            return ctx.reject(RejectReason::SessionOver, format!("{:?} ignored", command));
        }

        let outcome = match *command {
            Command::SetControlRod(percent) => set_control_rod(ctx, percent),
            Command::SetSteamValve(percent) => set_steam_valve(ctx, percent),
            Command::TogglePump => toggle_pump(ctx),
            Command::Repair(component) => repair(ctx, component),
            Command::CreateSpe => create_spe(ctx),
            Command::Lobby => lobby(ctx),
            Command::CookBooks => cook_books(ctx),
            Command::ShredDocuments => shred_documents(ctx),
            Command::SiphonToOffshore(amount) => siphon_to_offshore(ctx, amount),
            Command::Borrow(amount) => borrow(ctx, amount),
            Command::Refuel => refuel(ctx),
            Command::UpgradePump => upgrade_pump(ctx),
            Command::InstallAutoScram => install_auto_scram(ctx),
        };

        if outcome.is_applied() {
            tracing::debug!(tick = ctx.tick, ?command, "Command applied");
        }
        outcome
    }
}

fn set_control_rod(ctx: &mut CommandContext<'_>, percent: f64) -> CommandOutcome {
    ctx.state.reactor.control_rod_insertion = clamp_percent(percent);
    CommandOutcome::Applied
}

fn set_steam_valve(ctx: &mut CommandContext<'_>, percent: f64) -> CommandOutcome {
    ctx.state.reactor.steam_valve_opening = clamp_percent(percent);
    CommandOutcome::Applied
}

fn toggle_pump(ctx: &mut CommandContext<'_>) -> CommandOutcome {
    let reactor = &mut ctx.state.reactor;
    reactor.coolant_pump_on = !reactor.coolant_pump_on;
    CommandOutcome::Applied
}

fn repair(ctx: &mut CommandContext<'_>, component: Component) -> CommandOutcome {
    let cost = ctx.prices.repair(component);
    if let Err(rejected) = ctx.pay_cash(cost, &format!("{} repair", component.name())) {
        return rejected;
    }

    let reactor = &mut ctx.state.reactor;
    match component {
        Component::Pump => reactor.pump_health = 100.0,
        Component::Turbine => reactor.turbine_health = 100.0,
        Component::Condenser => reactor.condenser_health = 100.0,
    }
    ctx.info(
        EventKind::Repaired,
        format!("{} REPAIRED", component.name().to_uppercase()),
        format!("Maintenance invoice ${:.0}", cost),
    );
    CommandOutcome::Applied
}

fn create_spe(ctx: &mut CommandContext<'_>) -> CommandOutcome {
    let cost = ctx.prices.price(PricedAction::CreateSpe);
    let score = ctx.state.finance.stock_score;
    if score < cost {
        return ctx.reject(
            RejectReason::InsufficientScore,
            format!("An SPE needs {:.0} stock points, have {:.1}", cost, score),
        );
    }

    let tuning = &ctx.config.fraud;
    let hidden_debt = if tuning.spe_max_hidden_debt > tuning.spe_min_hidden_debt {
        ctx.rng
            .gen_range(tuning.spe_min_hidden_debt..tuning.spe_max_hidden_debt)
    } else {
        tuning.spe_min_hidden_debt
    };
    let name = format!("LJM-{}", ctx.rng.gen_range(0..100));

    let finance = &mut ctx.state.finance;
    finance.stock_score = score - cost + hidden_debt / tuning.spe_score_divisor;
    finance.audit_risk_percent = (finance.audit_risk_percent + tuning.spe_audit_risk).min(100.0);
    let trigger = finance.stock_score * tuning.spe_trigger_ratio;

    let id = ctx.state.fraud.open(name.clone(), hidden_debt, trigger);
    tracing::debug!(tick = ctx.tick, spe = %id, hidden_debt, trigger, "SPE created");
    ctx.info(
        EventKind::SpeCreated,
        format!("{} CREATED", name),
        format!("${:.0} moved off the books. Collapses below {:.1}.", hidden_debt, trigger),
    );
    CommandOutcome::Applied
}

fn lobby(ctx: &mut CommandContext<'_>) -> CommandOutcome {
    let cost = ctx.prices.price(PricedAction::Lobby);
    if let Err(rejected) = ctx.pay_cash(cost, "Lobbying") {
        return rejected;
    }

    let tuning = &ctx.config.lobbying;
    let finance = &mut ctx.state.finance;
    finance.audit_risk_percent = (finance.audit_risk_percent - tuning.audit_relief).max(0.0);
    finance.lobbying_shield_ticks_remaining = tuning.shield_ticks;
    ctx.info(
        EventKind::Purchased,
        "LOBBYISTS DEPLOYED",
        "Regulators are looking the other way.",
    );
    CommandOutcome::Applied
}

fn cook_books(ctx: &mut CommandContext<'_>) -> CommandOutcome {
    let tuning = &ctx.config.fraud;
    let finance = &mut ctx.state.finance;
    finance.stock_score += tuning.cook_books_score;
    finance.audit_risk_percent =
        (finance.audit_risk_percent + tuning.cook_books_audit_risk).min(100.0);
    ctx.info(
        EventKind::FundsMoved,
        "BOOKS COOKED",
        "Mark-to-market earnings recognised.",
    );
    CommandOutcome::Applied
}

fn shred_documents(ctx: &mut CommandContext<'_>) -> CommandOutcome {
    let cost = ctx.prices.price(PricedAction::Shred);
    if let Err(rejected) = ctx.pay_cash(cost, "Shredding") {
        return rejected;
    }

    let relief = ctx.config.fraud.shred_audit_relief;
    let finance = &mut ctx.state.finance;
    finance.audit_risk_percent = (finance.audit_risk_percent - relief).max(0.0);
    ctx.info(
        EventKind::DocumentsShredded,
        "DOCUMENTS SHREDDED",
        "The paper trail is gone.",
    );
    CommandOutcome::Applied
}

fn siphon_to_offshore(ctx: &mut CommandContext<'_>, amount: f64) -> CommandOutcome {
    if !amount.is_finite() || amount <= 0.0 {
        return ctx.reject(RejectReason::InvalidAmount, format!("Cannot siphon {}", amount));
    }
    if let Err(rejected) = ctx.pay_cash(amount, "Transfer") {
        return rejected;
    }

    let risk = amount * ctx.config.fraud.siphon_audit_risk_per_dollar;
    let finance = &mut ctx.state.finance;
    finance.offshore_holdings += amount;
    finance.audit_risk_percent = (finance.audit_risk_percent + risk).min(100.0);
    ctx.info(
        EventKind::FundsMoved,
        "WIRE TRANSFER COMPLETE",
        format!("${:.0} routed to the Caymans.", amount),
    );
    CommandOutcome::Applied
}

fn borrow(ctx: &mut CommandContext<'_>, amount: f64) -> CommandOutcome {
    if !amount.is_finite() || amount <= 0.0 {
        return ctx.reject(RejectReason::InvalidAmount, format!("Cannot borrow {}", amount));
    }

    let config = ctx.config;
    let tuning = &config.finance;
    let credit_line = ctx.state.finance.credit_score * tuning.credit_line_per_point;
    if amount > credit_line {
        return ctx.reject(
            RejectReason::CreditLimit,
            format!("Credit line is ${:.0}", credit_line),
        );
    }

    let finance = &mut ctx.state.finance;
    finance.operating_cash += amount;
    finance.outstanding_loan += amount;
    finance.credit_score =
        clamp_percent(finance.credit_score - amount / tuning.credit_cost_per_point);
    ctx.info(
        EventKind::FundsMoved,
        "LOAN APPROVED",
        format!("${:.0} drawn on the credit line.", amount),
    );
    CommandOutcome::Applied
}

fn refuel(ctx: &mut CommandContext<'_>) -> CommandOutcome {
    let cost = ctx.prices.price(PricedAction::Refuel);
    if let Err(rejected) = ctx.pay_cash(cost, "Fuel delivery") {
        return rejected;
    }

    ctx.state.reactor.fuel_remaining = 100.0;
    ctx.info(EventKind::Purchased, "CORE REFUELLED", "Fresh fuel assemblies loaded.");
    CommandOutcome::Applied
}

fn upgrade_pump(ctx: &mut CommandContext<'_>) -> CommandOutcome {
    let level = ctx.state.reactor.pump_level;
    if level >= MAX_PUMP_LEVEL {
        return ctx.reject(RejectReason::MaxLevel, format!("Pump is at level {}", level));
    }

    let cost = ctx.prices.price(PricedAction::PumpUpgrade) * f64::from(level);
    if let Err(rejected) = ctx.pay_cash(cost, "Pump upgrade") {
        return rejected;
    }

    ctx.state.reactor.pump_level = level + 1;
    ctx.info(
        EventKind::Purchased,
        "PUMP UPGRADED",
        format!("Coolant pump now level {}", level + 1),
    );
    CommandOutcome::Applied
}

fn install_auto_scram(ctx: &mut CommandContext<'_>) -> CommandOutcome {
    if ctx.state.reactor.has_auto_scram {
        return ctx.reject(RejectReason::AlreadyInstalled, "Auto-SCRAM is already fitted");
    }

    let cost = ctx.prices.price(PricedAction::AutoScram);
    if let Err(rejected) = ctx.pay_cash(cost, "Auto-SCRAM") {
        return rejected;
    }

    ctx.state.reactor.has_auto_scram = true;
    ctx.info(
        EventKind::Purchased,
        "AUTO-SCRAM INSTALLED",
        "Rods will drop automatically on overheat.",
    );
    CommandOutcome::Applied
}
