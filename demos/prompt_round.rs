//! One round of the drawing game, end to end.
//!
//! Load a dictionary, serve a few slates with the admin-tuned config, then
//! settle a short tournament with Elo updates.
//!
//! Run with:
//!   cargo run --example prompt_round

use rand::rngs::StdRng;
use rand::SeedableRng;
use sketchslate::{
    calculate_rating_change, select_slate_explain, BanditConfigUpdate, ConfigProvider,
    MemoryStore, PickReason, SharedConfig, WordStat, WordStatStore,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // -----------------------------------------------------------------
    // 1. Community dictionary with some history.
    // -----------------------------------------------------------------
    let store = MemoryStore::from_stats([
        WordStat { word: "cat".into(), pick_rate: 0.52, post_rate: 0.31, sample_size: 140 },
        WordStat { word: "dog".into(), pick_rate: 0.61, post_rate: 0.44, sample_size: 152 },
        WordStat { word: "tree".into(), pick_rate: 0.18, post_rate: 0.09, sample_size: 97 },
        WordStat { word: "rocket".into(), pick_rate: 0.47, post_rate: 0.38, sample_size: 64 },
    ]);

    // A moderator adds two words and retires one; history carries over.
    let summary = store.replace_dictionary(["cat", "dog", "rocket", "volcano", "octopus"]);
    println!("dictionary: {summary:?}");

    // -----------------------------------------------------------------
    // 2. Admin tunes the bandit.
    // -----------------------------------------------------------------
    let provider = SharedConfig::default();
    provider.set_bandit_config(BanditConfigUpdate {
        exploration_rate: Some(0.3),
        z_score_clamp: Some(2.0),
        weight_pick_rate: Some(1.0),
        weight_post_rate: Some(1.5),
    })?;

    // -----------------------------------------------------------------
    // 3. Serve slates.
    // -----------------------------------------------------------------
    let mut rng = StdRng::seed_from_u64(7);
    for round in 0..4 {
        let cfg = provider.bandit_config();
        let decision = select_slate_explain(&store.word_stats(), &cfg, 3, &mut rng)?;
        let shown: Vec<String> = decision
            .picks
            .iter()
            .map(|p| match p.reason {
                PickReason::Exploit => p.word.clone(),
                PickReason::Explore => format!("{}*", p.word),
            })
            .collect();
        println!("round {round}: {}", shown.join(", "));
    }
    println!("(* = exploration pick)");

    // -----------------------------------------------------------------
    // 4. Settle a tournament.
    // -----------------------------------------------------------------
    let k = provider.k_factor();
    let (mut ana, mut bo) = (1180.0, 1320.0);
    for ana_wins in [true, true, false] {
        let (w, l) = if ana_wins { (ana, bo) } else { (bo, ana) };
        let delta = calculate_rating_change(w, l, k);
        let (w, l) = delta.apply(w, l);
        if ana_wins {
            (ana, bo) = (w, l);
        } else {
            (bo, ana) = (w, l);
        }
        println!(
            "{} wins: {:+} / {:+} -> ana {ana}, bo {bo}",
            if ana_wins { "ana" } else { "bo" },
            delta.winner_change,
            delta.loser_change
        );
    }
    Ok(())
}
