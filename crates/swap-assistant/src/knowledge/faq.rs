//! Canned answers for common NEAR topics.

/// Topic key → answer, checked in order; the first key contained in the
/// lower-cased query wins.
pub const FAQ: &[(&str, &str)] = &[
    (
        "sharding",
        "**Sharding on NEAR**\n\n\
         NEAR uses Nightshade sharding: the chain's state is split across \
         shards that process transactions in parallel, and each block \
         contains a chunk from every shard. Validators only track the shards \
         they are assigned to, so throughput grows with the number of shards.",
    ),
    (
        "staking",
        "**Staking on NEAR**\n\n\
         You stake NEAR by delegating to a validator's staking pool. Staked \
         tokens earn protocol rewards (around 5% a year before fees) and can \
         be unstaked at any time, becoming withdrawable after roughly 4 epochs \
         (about 48 hours).",
    ),
    (
        "validator",
        "**Validators on NEAR**\n\n\
         Validators produce blocks and chunks and are selected each epoch by \
         stake. Chunk-only producers and block producers are rewarded in \
         proportion to their stake and uptime; offline validators lose their \
         seat for following epochs.",
    ),
    (
        // keyword classifier mode routes "bridge" to the trade path, so this
        // entry is only reachable in strict mode
        "bridge",
        "**Bridging to NEAR**\n\n\
         The Rainbow Bridge moves assets between Ethereum, Aurora and NEAR \
         without a trusted custodian: each side runs a light client of the \
         other. Transfers from Ethereum take a few minutes; transfers back \
         wait for a challenge period.",
    ),
    (
        "nightshade",
        "**Nightshade**\n\n\
         Nightshade is NEAR's sharding design: the protocol treats the system \
         as one chain whose blocks are made of per-shard chunks, which keeps \
         cross-shard finality as fast as single-shard finality.",
    ),
    (
        "gas",
        "**Gas on NEAR**\n\n\
         Transactions pay gas in NEAR at a low, predictable price. 30% of the \
         gas burned by a contract call is paid to that contract's account as a \
         developer reward.",
    ),
    (
        "named account",
        "**NEAR accounts**\n\n\
         NEAR accounts have human-readable names such as `alice.near`, can \
         hold several access keys with different permissions, and can create \
         sub-accounts like `app.alice.near`.",
    ),
];

/// Canned answer for the first topic contained in `query`
pub fn lookup(query: &str) -> Option<&'static str> {
    let lower = query.to_lowercase();
    FAQ.iter()
        .find(|(topic, _)| lower.contains(topic))
        .map(|(_, answer)| *answer)
}
