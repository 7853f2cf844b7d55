use std::{
    env,
    fmt::Write as _,
    io::{self, IsTerminal},
};

use colored::Colorize;
use split_core::{CurrencyFormatter, DetailedGroupView, IntegrityError, SettlementTransfer};
use split_domain::Money;
use uuid::Uuid;

/// Enables colors only when config allows it, stdout is a terminal and `NO_COLOR` is unset.
pub fn configure_color(enabled: bool) {
    let allowed = enabled && env::var_os("NO_COLOR").is_none() && io::stdout().is_terminal();
    colored::control::set_override(allowed);
}

fn section(title: &str) -> String {
    title.bold().underline().to_string()
}

/// Colors already-padded text by the sign of `amount`.
fn signed(text: String, amount: Money) -> String {
    if amount > Money::ZERO {
        text.green().to_string()
    } else if amount < Money::ZERO {
        text.red().to_string()
    } else {
        text.dimmed().to_string()
    }
}

pub fn render_balance(
    view: &DetailedGroupView,
    formatter: &dyn CurrencyFormatter,
    currency: &str,
) -> String {
    let money = |amount: Money| formatter.format_amount(amount, currency);
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{} ({} model)",
        section(&format!("Group: {}", view.name)),
        view.settlement_model
    );
    let _ = writeln!(out, "  Total expenses: {}", money(view.total_expense_amount));
    let _ = writeln!(out, "  Total payments: {}", money(view.total_payment_amount));
    let _ = writeln!(out, "  Amount due:     {}", money(view.amount_due));
    let _ = writeln!(out);

    if view.balances.is_empty() {
        let _ = writeln!(out, "{}", "No members yet.".italic());
        return out;
    }

    let name_width = view
        .balances
        .iter()
        .map(|balance| balance.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("Member".len());
    let _ = writeln!(
        out,
        "{}",
        format!(
            "{:<name_width$}  {:>16}  {:>16}  {:>16}  {:>16}",
            "Member", "Share", "Paid", "Owed", "Net"
        )
        .bold()
    );
    for balance in &view.balances {
        let net = signed(
            format!("{:>16}", money(balance.net_balance)),
            balance.net_balance,
        );
        let _ = writeln!(
            out,
            "{:<name_width$}  {:>16}  {:>16}  {:>16}  {net}",
            balance.name,
            money(balance.share_total),
            money(balance.expenses_paid),
            money(balance.amount_owed),
        );
    }
    out
}

pub fn render_transfers(
    view: &DetailedGroupView,
    transfers: &[SettlementTransfer],
    formatter: &dyn CurrencyFormatter,
    currency: &str,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", section(&format!("Settle up: {}", view.name)));
    if transfers.is_empty() {
        let _ = writeln!(out, "  {}", "Everyone is settled up.".green());
        return out;
    }
    for transfer in transfers {
        let _ = writeln!(
            out,
            "  {} -> {}: {}",
            member_name(view, transfer.from),
            member_name(view, transfer.to),
            formatter.format_amount(transfer.amount, currency).bold()
        );
    }
    out
}

pub fn render_violations(group_name: &str, violations: &[IntegrityError]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", section(&format!("Integrity check: {group_name}")));
    if violations.is_empty() {
        let _ = writeln!(out, "  {}", "No integrity violations.".green());
        return out;
    }
    for violation in violations {
        let _ = writeln!(out, "  {} {violation}", "[x]".red().bold());
    }
    let _ = writeln!(
        out,
        "{}",
        format!("{} violation(s) found.", violations.len()).yellow()
    );
    out
}

fn member_name(view: &DetailedGroupView, id: Uuid) -> String {
    view.members
        .iter()
        .find(|member| member.id == id)
        .map(|member| member.name.clone())
        .unwrap_or_else(|| id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use split_core::{BalanceService, GroupService, PolicyFormatter, SettlementService};
    use split_domain::{Expense, Member, RoundingPolicy};

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn balance_table_lists_members_with_rounded_amounts() {
        plain();
        let mut group = GroupService::create("Weekend");
        let alice = GroupService::add_member(&mut group, Member::new("Alice")).unwrap();
        let bob = GroupService::add_member(&mut group, Member::new("Bob")).unwrap();
        let gid = group.id;
        GroupService::add_expense(
            &mut group,
            Expense::even(gid, "Cabin", dec!(100), alice, [alice, bob]),
        )
        .unwrap();

        let view = BalanceService::compute(&group).unwrap();
        let text = render_balance(&view, &PolicyFormatter::default(), "EUR");
        assert!(text.contains("Group: Weekend"));
        assert!(text.contains("Total expenses: 100.00 EUR"));
        assert!(text.contains("Alice"));
        assert!(text.contains("50.00 EUR"));
        assert!(text.contains("-50.00 EUR"));
    }

    #[test]
    fn transfers_use_member_names() {
        plain();
        let mut group = GroupService::create("Dinner");
        let alice = GroupService::add_member(&mut group, Member::new("Alice")).unwrap();
        let bob = GroupService::add_member(&mut group, Member::new("Bob")).unwrap();
        let gid = group.id;
        GroupService::add_expense(
            &mut group,
            Expense::even(gid, "Pizza", dec!(30), bob, [alice, bob]),
        )
        .unwrap();

        let view = BalanceService::compute(&group).unwrap();
        let transfers = SettlementService::suggest(&view, RoundingPolicy::default());
        let text = render_transfers(&view, &transfers, &PolicyFormatter::default(), "USD");
        assert!(text.contains("Alice -> Bob: 15.00 USD"));
    }

    #[test]
    fn clean_report_says_so() {
        plain();
        let text = render_violations("Empty", &[]);
        assert!(text.contains("No integrity violations."));
    }
}
