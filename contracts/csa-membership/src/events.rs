//! # Structured Event Emissions for the Membership Lifecycle
//!
//! One topic and payload struct per state change, published through the
//! host event system so off-chain indexers can follow season, sale, and
//! redemption activity.

use soroban_sdk::{contracttype, symbol_short, Address, Env, String, Symbol};

use crate::Season;

// ════════════════════════════════════════════════════════════════════
//  Event Topics (Short symbols for efficient indexing)
// ════════════════════════════════════════════════════════════════════

/// Topic for season creation events
pub const TOPIC_SEASON_CREATED: Symbol = symbol_short!("ssn_new");
/// Topic for sales closure events
pub const TOPIC_SALES_CLOSED: Symbol = symbol_short!("ssn_cls");
/// Topic for membership mint events
pub const TOPIC_MEMBERSHIP_MINTED: Symbol = symbol_short!("mem_mint");
/// Topic for share transfer events
pub const TOPIC_SHARE_TRANSFERRED: Symbol = symbol_short!("shr_xfer");
/// Topic for weekly box redemption events
pub const TOPIC_BOX_REDEEMED: Symbol = symbol_short!("box_red");
/// Topic for withdrawal events
pub const TOPIC_FUNDS_WITHDRAWN: Symbol = symbol_short!("withdraw");
/// Topic for admin transfer events
pub const TOPIC_ADMIN_TRANSFERRED: Symbol = symbol_short!("adm_xfer");

// ════════════════════════════════════════════════════════════════════
//  Event Data Structures
// ════════════════════════════════════════════════════════════════════

/// Event data for season creation
#[contracttype]
#[derive(Clone, Debug)]
pub struct SeasonCreatedEvent {
    /// Id of the new season
    pub season_id: u32,
    /// Display name of the season
    pub name: String,
    /// Membership price in payment-token smallest units
    pub membership_price: i128,
    /// Capacity cap for the season
    pub total_memberships: u32,
    /// Season duration in weeks
    pub duration_weeks: u32,
    /// Admin that created the season
    pub created_by: Address,
}

/// Event data for sales closure
#[contracttype]
#[derive(Clone, Debug)]
pub struct SalesClosedEvent {
    /// Id of the closed season
    pub season_id: u32,
    /// Admin that closed the sales
    pub closed_by: Address,
}

/// Event data for a membership purchase
#[contracttype]
#[derive(Clone, Debug)]
pub struct MembershipMintedEvent {
    /// Id of the minted share
    pub token_id: u64,
    /// Season the share belongs to
    pub season_id: u32,
    /// Address the share was minted to
    pub buyer: Address,
}

/// Event data for a share transfer
#[contracttype]
#[derive(Clone, Debug)]
pub struct ShareTransferredEvent {
    /// Id of the transferred share
    pub token_id: u64,
    /// Previous owner
    pub from: Address,
    /// New owner
    pub to: Address,
}

/// Event data for a weekly box redemption
#[contracttype]
#[derive(Clone, Debug)]
pub struct BoxRedeemedEvent {
    /// Share that redeemed its box
    pub token_id: u64,
    /// Week index the box was redeemed for
    pub week: u32,
}

/// Event data for a withdrawal
#[contracttype]
#[derive(Clone, Debug)]
pub struct FundsWithdrawnEvent {
    /// Amount moved to the admin
    pub amount: i128,
    /// Receiving address
    pub to: Address,
}

/// Event data for an admin transfer
#[contracttype]
#[derive(Clone, Debug)]
pub struct AdminTransferredEvent {
    /// Previous admin
    pub old_admin: Address,
    /// New admin
    pub new_admin: Address,
}

// ════════════════════════════════════════════════════════════════════
//  Event Emission Functions
// ════════════════════════════════════════════════════════════════════

/// Emit a season created event.
pub fn emit_season_created(env: &Env, season: &Season, created_by: &Address) {
    let event = SeasonCreatedEvent {
        season_id: season.id,
        name: season.name.clone(),
        membership_price: season.membership_price,
        total_memberships: season.total_memberships,
        duration_weeks: season.duration_weeks,
        created_by: created_by.clone(),
    };
    env.events()
        .publish((TOPIC_SEASON_CREATED, season.id), event);
}

/// Emit a sales closed event.
pub fn emit_sales_closed(env: &Env, season_id: u32, closed_by: &Address) {
    let event = SalesClosedEvent {
        season_id,
        closed_by: closed_by.clone(),
    };
    env.events().publish((TOPIC_SALES_CLOSED, season_id), event);
}

/// Emit a membership minted event.
///
/// Emitted once per successful purchase, after the share is minted and the
/// season's sold count is updated.
pub fn emit_membership_minted(env: &Env, token_id: u64, season_id: u32, buyer: &Address) {
    let event = MembershipMintedEvent {
        token_id,
        season_id,
        buyer: buyer.clone(),
    };
    env.events()
        .publish((TOPIC_MEMBERSHIP_MINTED, buyer.clone()), event);
}

/// Emit a share transferred event.
pub fn emit_share_transferred(env: &Env, token_id: u64, from: &Address, to: &Address) {
    let event = ShareTransferredEvent {
        token_id,
        from: from.clone(),
        to: to.clone(),
    };
    env.events()
        .publish((TOPIC_SHARE_TRANSFERRED, token_id), event);
}

/// Emit a box redeemed event carrying the (token id, week) pair.
pub fn emit_box_redeemed(env: &Env, token_id: u64, week: u32) {
    let event = BoxRedeemedEvent { token_id, week };
    env.events().publish((TOPIC_BOX_REDEEMED, token_id), event);
}

/// Emit a funds withdrawn event.
pub fn emit_funds_withdrawn(env: &Env, amount: i128, to: &Address) {
    let event = FundsWithdrawnEvent {
        amount,
        to: to.clone(),
    };
    env.events().publish((TOPIC_FUNDS_WITHDRAWN,), event);
}

/// Emit an admin transferred event.
pub fn emit_admin_transferred(env: &Env, old_admin: &Address, new_admin: &Address) {
    let event = AdminTransferredEvent {
        old_admin: old_admin.clone(),
        new_admin: new_admin.clone(),
    };
    env.events().publish((TOPIC_ADMIN_TRANSFERRED,), event);
}
