//! Integration tests for the card cycle: gating, the reference session,
//! and reset on eject.

use atm_terminal::SessionError;
use atm_terminal::app::events::AppEvent;
use atm_terminal::fsm::SessionState;

use super::mock_hw::{BankCall, acc, make_atm, ready_atm};

// ── Gating on a fresh session ─────────────────────────────────

#[test]
fn pin_before_card_is_refused() {
    let mut atm = make_atm();
    assert_eq!(atm.enter_pin("4321"), Err(SessionError::NoCardInserted));
    assert!(atm.bank().calls().is_empty(), "bank must not be consulted");
}

#[test]
fn select_before_pin_is_refused() {
    let mut atm = make_atm();
    assert_eq!(
        atm.select_account(acc("ACC-111")),
        Err(SessionError::NotAuthenticated)
    );
    atm.insert_card().unwrap();
    assert_eq!(
        atm.select_account(acc("ACC-111")),
        Err(SessionError::NotAuthenticated)
    );
}

#[test]
fn transactions_before_select_are_refused() {
    let mut atm = make_atm();
    atm.insert_card().unwrap();
    atm.enter_pin("4321").unwrap();
    assert_eq!(atm.get_balance(), Err(SessionError::NoAccountSelected));
    assert_eq!(atm.deposit(10), Err(SessionError::NoAccountSelected));
    assert_eq!(atm.withdraw(10), Err(SessionError::NoAccountSelected));
    assert_eq!(atm.state(), SessionState::Authenticated);
}

#[test]
fn wrong_pin_allows_retry() {
    let mut atm = make_atm();
    atm.insert_card().unwrap();
    assert_eq!(atm.enter_pin("0000"), Ok(false));
    assert!(!atm.session().is_authenticated());
    assert_eq!(atm.state(), SessionState::CardPresent);
    assert_eq!(atm.enter_pin("4321"), Ok(true));
    assert_eq!(atm.state(), SessionState::Authenticated);
}

#[test]
fn reinsert_resets_authentication() {
    let mut atm = ready_atm();
    atm.insert_card().unwrap();
    assert_eq!(atm.state(), SessionState::CardPresent);
    assert_eq!(atm.status().account, None);
    assert_eq!(atm.get_balance(), Err(SessionError::NoAccountSelected));
}

// ── Reference session (A → D) ─────────────────────────────────

#[test]
fn reference_session_scenarios() {
    let mut atm = make_atm();

    // A: wrong PIN, then right PIN, then opening balance.
    atm.insert_card().unwrap();
    assert_eq!(atm.enter_pin("0000"), Ok(false));
    assert_eq!(atm.enter_pin("4321"), Ok(true));
    atm.select_account(acc("ACC-111")).unwrap();
    assert_eq!(atm.get_balance(), Ok(100));

    // B: deposit.
    atm.deposit(50).unwrap();
    assert_eq!(atm.get_balance(), Ok(150));

    // C: withdrawal within funds and stock.
    atm.withdraw(70).unwrap();
    assert_eq!(atm.get_balance(), Ok(80));
    assert_eq!(atm.dispenser().inner.stock(), 130);

    // D: overdraw.
    assert_eq!(
        atm.withdraw(200),
        Err(SessionError::InsufficientFunds {
            requested: 200,
            available: 80
        })
    );
    assert_eq!(atm.get_balance(), Ok(80));
    assert_eq!(atm.dispenser().inner.stock(), 130);
}

#[test]
fn non_positive_amounts_are_invalid() {
    let mut atm = ready_atm();
    assert_eq!(atm.deposit(-5), Err(SessionError::InvalidAmount(-5)));
    assert_eq!(atm.withdraw(0), Err(SessionError::InvalidAmount(0)));
    assert_eq!(atm.get_balance(), Ok(100));
}

#[test]
fn withdrawal_checks_funds_before_stock() {
    let mut atm = ready_atm();
    atm.deposit(500).unwrap();
    assert_eq!(
        atm.withdraw(300),
        Err(SessionError::InsufficientCash { requested: 300 })
    );
    assert_eq!(atm.get_balance(), Ok(600), "no debit on refused withdrawal");
    assert_eq!(atm.dispenser().dispense_calls, 0);
}

#[test]
fn withdrawal_rereads_balance_and_debits_before_dispensing() {
    let mut atm = ready_atm();
    atm.withdraw(30).unwrap();
    let calls = atm.bank().calls();
    let tail = &calls[calls.len() - 2..];
    assert_eq!(
        tail,
        &[
            BankCall::GetBalance {
                account: "ACC-111".into()
            },
            BankCall::Debit {
                account: "ACC-111".into(),
                amount: 30
            },
        ]
    );
    assert_eq!(atm.dispenser().dispense_calls, 1);
}

// ── Eject (F) ─────────────────────────────────────────────────

#[test]
fn eject_clears_everything() {
    let mut atm = ready_atm();
    atm.eject_card();
    assert_eq!(atm.state(), SessionState::Idle);
    assert_eq!(atm.enter_pin("4321"), Err(SessionError::NoCardInserted));
    assert_eq!(
        atm.select_account(acc("ACC-111")),
        Err(SessionError::NotAuthenticated)
    );
    assert_eq!(atm.get_balance(), Err(SessionError::NoAccountSelected));
}

#[test]
fn eject_twice_is_harmless() {
    let mut atm = ready_atm();
    atm.eject_card();
    let events_after_first = atm.sink().events.len();
    atm.eject_card();
    assert_eq!(atm.state(), SessionState::Idle);
    assert_eq!(atm.sink().events.len(), events_after_first, "second eject is silent");
    assert_eq!(atm.reader().inner.ejects(), 2);
}

#[test]
fn controller_is_reusable_across_card_cycles() {
    let mut atm = ready_atm();
    atm.deposit(25).unwrap();
    atm.eject_card();

    atm.insert_card().unwrap();
    atm.enter_pin("4321").unwrap();
    atm.select_account(acc("ACC-111")).unwrap();
    assert_eq!(atm.get_balance(), Ok(125));
}

// ── Events ────────────────────────────────────────────────────

#[test]
fn events_trace_the_session() {
    let mut atm = make_atm();
    atm.insert_card().unwrap();
    atm.enter_pin("4321").unwrap();
    atm.select_account(acc("ACC-111")).unwrap();
    atm.withdraw(10).unwrap();
    atm.eject_card();

    let events = &atm.sink().events;
    assert!(events.contains(&AppEvent::StateChanged {
        from: SessionState::Idle,
        to: SessionState::CardPresent
    }));
    assert!(events.contains(&AppEvent::Withdrawn {
        account: acc("ACC-111"),
        amount: 10
    }));
    assert_eq!(
        events.last(),
        Some(&AppEvent::StateChanged {
            from: SessionState::AccountSelected,
            to: SessionState::Idle
        })
    );
}
