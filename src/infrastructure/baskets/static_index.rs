use crate::domain::ports::basket_index::BasketIndex;
use std::collections::{HashMap, HashSet};

/// NSE index membership, frozen at build time. Index constituents change a
/// couple of times a year; these tables are configuration, not live data.
const NIFTY50: &[&str] = &[
    "RELIANCE", "TCS", "HDFCBANK", "INFY", "HINDUNILVR", "ITC", "SBIN", "BHARTIARTL",
    "KOTAKBANK", "LT", "ASIANPAINT", "AXISBANK", "MARUTI", "SUNPHARMA", "TITAN",
    "ULTRACEMCO", "WIPRO", "NESTLEIND", "POWERGRID", "NTPC", "ONGC", "COALINDIA",
    "TECHM", "TATAMOTORS", "BAJFINANCE", "HCLTECH", "DRREDDY", "CIPLA", "EICHERMOT",
    "BAJAJFINSV", "GRASIM", "JSWSTEEL", "TATASTEEL", "APOLLOHOSP", "DIVISLAB",
    "HEROMOTOCO", "HINDALCO", "INDUSINDBK", "M&M", "SBILIFE", "TATACONSUM", "UPL",
    "ADANIPORTS", "BAJAJ-AUTO", "BRITANNIA", "HDFCLIFE", "ICICIBANK", "SHREECEM",
    "ADANIENT", "LTIM",
];

const BANKNIFTY: &[&str] = &[
    "HDFCBANK", "ICICIBANK", "SBIN", "KOTAKBANK", "AXISBANK", "INDUSINDBK",
    "BANKBARODA", "PNB", "AUBANK", "FEDERALBNK", "IDFCFIRSTB", "BANDHANBNK",
];

/// Midcap names layered on top of NIFTY50 for the broader indices.
const NIFTY200_EXTRA: &[&str] = &[
    "DMART", "PIDILITIND", "HAVELLS", "GODREJCP", "SIEMENS", "DABUR", "AMBUJACEM",
    "BOSCHLTD", "VEDL", "TORNTPHARM", "BERGEPAINT", "MCDOWELL-N", "MARICO", "GAIL",
    "LUPIN", "PAGEIND", "COLPAL", "MUTHOOTFIN", "NAUKRI", "INDIGO", "ZOMATO",
    "IRCTC", "TRENT", "POLYCAB", "ABB", "TVSMOTOR", "CHOLAFIN", "SRF",
];

const NIFTY500_EXTRA: &[&str] = &[
    "ASTRAL", "DIXON", "KPITTECH", "PERSISTENT", "COFORGE", "TATAELXSI", "MPHASIS",
    "LTTS", "CROMPTON", "VOLTAS", "BLUEDART", "SUPREMEIND", "AARTIIND", "DEEPAKNTR",
    "NAVINFLUOR", "GUJGASLTD", "IGL", "MGL", "CONCOR", "SUNTV", "RAMCOCEM",
    "CUMMINSIND", "THERMAX", "SCHAEFFLER", "GRINDWELL",
];

/// FNO-only names: in the derivatives segment without being index members.
const FNO_EXTRA: &[&str] = &[
    "CANBK", "RECLTD", "PFC", "IRFC", "NHPC", "SAIL", "NMDC", "BHEL", "IDEA",
    "YESBANK", "ZEEL", "DELTACORP", "MANAPPURAM", "GNFC", "BALRAMCHIN",
];

pub struct StaticBasketIndex {
    table: HashMap<String, HashSet<String>>,
}

impl StaticBasketIndex {
    pub fn new(table: HashMap<String, HashSet<String>>) -> Self {
        Self { table }
    }

    /// The basket set the dashboard ships with. Broader indices are built
    /// as supersets of the narrower ones.
    pub fn builtin() -> Self {
        let nifty50: HashSet<String> = to_set(NIFTY50);
        let banknifty: HashSet<String> = to_set(BANKNIFTY);

        let mut nifty200 = nifty50.clone();
        nifty200.extend(banknifty.iter().cloned());
        nifty200.extend(to_set(NIFTY200_EXTRA));

        let mut nifty500 = nifty200.clone();
        nifty500.extend(to_set(NIFTY500_EXTRA));

        // MULTICAP spans the large+mid universe; PLUS adds the small caps
        let multicap = nifty200.clone();
        let multicapplus = nifty500.clone();

        let mut fno = nifty200.clone();
        fno.extend(to_set(FNO_EXTRA));

        let mut table = HashMap::new();
        table.insert("NIFTY50".to_string(), nifty50);
        table.insert("BANKNIFTY".to_string(), banknifty);
        table.insert("NIFTY200".to_string(), nifty200);
        table.insert("NIFTY500".to_string(), nifty500);
        table.insert("MULTICAP".to_string(), multicap);
        table.insert("MULTICAPPLUS".to_string(), multicapplus);
        table.insert("FNO".to_string(), fno);
        Self { table }
    }
}

fn to_set(symbols: &[&str]) -> HashSet<String> {
    symbols.iter().map(|s| s.to_string()).collect()
}

impl BasketIndex for StaticBasketIndex {
    fn is_member(&self, symbol: &str, basket: &str) -> bool {
        self.table
            .get(&basket.to_uppercase())
            .is_some_and(|symbols| symbols.contains(&symbol.to_uppercase()))
    }

    fn count(&self, basket: &str) -> usize {
        self.table
            .get(&basket.to_uppercase())
            .map_or(0, |symbols| symbols.len())
    }

    fn baskets(&self) -> Vec<String> {
        let mut names: Vec<String> = self.table.keys().cloned().collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nifty50_membership() {
        let index = StaticBasketIndex::builtin();
        assert!(index.is_member("RELIANCE", "NIFTY50"));
        assert!(index.is_member("reliance", "nifty50"));
        assert!(!index.is_member("PNB", "NIFTY50"));
    }

    #[test]
    fn test_broader_indices_are_supersets() {
        let index = StaticBasketIndex::builtin();
        assert!(index.is_member("RELIANCE", "NIFTY200"));
        assert!(index.is_member("RELIANCE", "NIFTY500"));
        assert!(index.count("NIFTY500") > index.count("NIFTY200"));
        assert!(index.count("NIFTY200") > index.count("NIFTY50"));
    }

    #[test]
    fn test_unknown_basket() {
        let index = StaticBasketIndex::builtin();
        assert!(!index.is_member("RELIANCE", "NASDAQ100"));
        assert_eq!(index.count("NASDAQ100"), 0);
    }
}
