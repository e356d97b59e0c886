//! Built-in term catalog for first-run seeding.
//!
//! The core game logic never touches this module; it only requires that the
//! catalog is queryable once the repository has bootstrapped it.

use crate::db::NewTerm;
use crate::game::Difficulty;

fn term(
    word: &str,
    difficulty: Difficulty,
    category: &str,
    definition: &str,
    hint: &str,
    fun_fact: &str,
) -> NewTerm {
    NewTerm::new(
        word.to_string(),
        difficulty.to_db_string().to_string(),
        category.to_string(),
        definition.to_string(),
        hint.to_string(),
        Some(fun_fact.to_string()),
        true,
    )
}

/// The terms inserted when the catalog is empty.
pub fn builtin_catalog() -> Vec<NewTerm> {
    use Difficulty::{Advanced, Beginner, Intermediate};

    vec![
        // Beginner
        term(
            "BITCOIN",
            Beginner,
            "Digital Currency",
            "A decentralized digital currency that operates without a central authority",
            "The first and most well-known cryptocurrency",
            "Created by the pseudonymous Satoshi Nakamoto in 2009",
        ),
        term(
            "WALLET",
            Beginner,
            "Storage",
            "Software or hardware that stores Bitcoin private keys",
            "Digital container for your Bitcoin",
            "Can be hot (online) or cold (offline) storage",
        ),
        term(
            "MINING",
            Beginner,
            "Process",
            "The process of validating transactions and adding them to the blockchain",
            "Digital gold rush activity using computational power",
            "Miners compete to solve complex mathematical puzzles",
        ),
        term(
            "SATOSHI",
            Beginner,
            "Unit",
            "The smallest unit of Bitcoin, equal to 0.00000001 BTC",
            "Named after Bitcoin's creator",
            "There are 100 million satoshis in one Bitcoin",
        ),
        term(
            "HASH",
            Beginner,
            "Cryptography",
            "A mathematical function that converts input data into a fixed-size string",
            "Digital fingerprint of data",
            "Bitcoin uses SHA-256 hashing algorithm",
        ),
        term(
            "NODE",
            Beginner,
            "Network",
            "A computer that participates in the Bitcoin network",
            "Network participant running Bitcoin software",
            "Full nodes validate all transactions and blocks",
        ),
        term(
            "BLOCK",
            Beginner,
            "Structure",
            "A collection of Bitcoin transactions grouped together",
            "Building block of the blockchain",
            "New blocks are created approximately every 10 minutes",
        ),
        term(
            "SEED",
            Beginner,
            "Security",
            "A series of words used to recover a Bitcoin wallet",
            "Recovery phrase for your wallet",
            "Usually consists of 12 or 24 words",
        ),
        term(
            "FEE",
            Beginner,
            "Cost",
            "Payment made to miners for processing a transaction",
            "Cost to send Bitcoin",
            "Higher fees typically result in faster confirmation",
        ),
        term(
            "LEDGER",
            Beginner,
            "Record",
            "A record of all Bitcoin transactions",
            "Public transaction record book",
            "Bitcoin's ledger is transparent and publicly auditable",
        ),
        // Intermediate
        term(
            "HODLING",
            Intermediate,
            "Strategy",
            "A long-term investment strategy of holding Bitcoin regardless of market volatility",
            "Hold On for Dear Life - popular Bitcoin strategy",
            "Term originated from a misspelled 'holding' in a Bitcoin forum",
        ),
        term(
            "HALVING",
            Intermediate,
            "Event",
            "An event that reduces the Bitcoin mining reward by half",
            "Happens approximately every 4 years",
            "Designed to control Bitcoin's inflation rate",
        ),
        term(
            "SCARCITY",
            Intermediate,
            "Economics",
            "The fundamental economic problem of limited resources",
            "Bitcoin's key value proposition with 21M cap",
            "Only 21 million Bitcoin will ever exist",
        ),
        term(
            "INFLATION",
            Intermediate,
            "Economics",
            "General increase in prices and fall in purchasing power",
            "What Bitcoin aims to protect against",
            "Bitcoin's fixed supply protects against monetary inflation",
        ),
        term(
            "CUSTODY",
            Intermediate,
            "Service",
            "The safekeeping of Bitcoin on behalf of others",
            "Third-party storage service",
            "Institutional custody services enable corporate adoption",
        ),
        term(
            "STACKING",
            Intermediate,
            "Strategy",
            "Regularly accumulating Bitcoin over time",
            "Dollar-cost averaging into Bitcoin",
            "Stacking sats means buying small amounts regularly",
        ),
        term(
            "WHALE",
            Intermediate,
            "Participant",
            "An individual or entity holding large amounts of Bitcoin",
            "Large Bitcoin holder",
            "Whale movements can influence market prices",
        ),
        term(
            "FUTURES",
            Intermediate,
            "Derivatives",
            "Contracts to buy or sell Bitcoin at a future date",
            "Derivative trading instrument",
            "Bitcoin futures enable institutional exposure without custody",
        ),
        term(
            "LEVERAGE",
            Intermediate,
            "Trading",
            "Using borrowed capital to increase potential returns",
            "Amplified trading exposure",
            "High leverage can lead to rapid liquidation",
        ),
        term(
            "ADOPTION",
            Intermediate,
            "Growth",
            "The process of Bitcoin becoming more widely accepted",
            "Growing acceptance and usage",
            "Institutional adoption began accelerating in 2020",
        ),
        // Advanced
        term(
            "UTXO",
            Advanced,
            "Technical",
            "Unspent Transaction Output - Bitcoin's accounting model",
            "Bitcoin's unique transaction model",
            "Each Bitcoin transaction consumes UTXOs and creates new ones",
        ),
        term(
            "HASHRATE",
            Advanced,
            "Mining",
            "The total computational power securing the Bitcoin network",
            "Network security measurement in hashes per second",
            "Higher hashrate means more secure network",
        ),
        term(
            "MERKLE",
            Advanced,
            "Technical",
            "A tree structure used to efficiently verify transaction data",
            "Tree structure for efficient data verification",
            "Named after computer scientist Ralph Merkle",
        ),
        term(
            "SCHNORR",
            Advanced,
            "Cryptography",
            "A digital signature scheme used in Bitcoin's Taproot upgrade",
            "Advanced signature scheme in Bitcoin",
            "Provides better privacy and efficiency than ECDSA",
        ),
        term(
            "LIGHTNING",
            Advanced,
            "Scaling",
            "A second-layer payment protocol for fast Bitcoin transactions",
            "Layer 2 solution for instant payments",
            "Enables micropayments and instant transactions",
        ),
        term(
            "SEGWIT",
            Advanced,
            "Upgrade",
            "Segregated Witness - a Bitcoin protocol upgrade",
            "2017 Bitcoin upgrade for efficiency",
            "Separated signatures from transaction data",
        ),
        term(
            "TAPROOT",
            Advanced,
            "Upgrade",
            "A Bitcoin upgrade improving privacy and smart contracts",
            "2021 Bitcoin upgrade for privacy",
            "Makes complex transactions look like simple ones",
        ),
        term(
            "MULTISIG",
            Advanced,
            "Security",
            "Requiring multiple signatures to authorize a transaction",
            "Multiple key security mechanism",
            "Commonly used for corporate Bitcoin custody",
        ),
        term(
            "COINBASE",
            Advanced,
            "Transaction",
            "The first transaction in a block that pays the miner",
            "Block reward transaction",
            "Only transaction that creates new Bitcoin",
        ),
        term(
            "COINJOIN",
            Advanced,
            "Privacy",
            "A privacy technique mixing multiple transactions",
            "Transaction mixing for privacy",
            "Makes transaction analysis more difficult",
        ),
    ]
}
