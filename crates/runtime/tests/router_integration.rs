use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

use runtime::{
    BlockPos, EventRouter, HandlerContext, KillHandler, MetricsSnapshot, Occurrence,
    OccurrenceHandler, OccurrenceKind, RouteOutcome, RuntimeConfig, StatNames,
};
use stattrak_core::{Item, LoreHolder};
use uuid::Uuid;

fn held(item: &mut Item) -> &mut dyn LoreHolder {
    item
}

fn lore(item: &Item) -> Vec<String> {
    item.lore.clone().unwrap_or_default()
}

fn router() -> EventRouter {
    EventRouter::new(RuntimeConfig::default()).expect("router should build inside a runtime")
}

fn kill(router: &EventRouter, entity: Uuid, weapon: &mut Item) -> RouteOutcome {
    router.route(Occurrence::EntityDied {
        entity,
        weapon: Some(held(weapon)),
    })
}

#[tokio::test]
async fn kill_increments_existing_counter() {
    let router = router();
    let mut sword = Item::new("DIAMOND_SWORD").with_lore(["Sharpness V", "§d StatTrak™ Kills: 3"]);

    let outcome = kill(&router, Uuid::new_v4(), &mut sword);

    assert_eq!(outcome, RouteOutcome::Applied { updated: 1 });
    assert_eq!(lore(&sword), vec!["Sharpness V", "§d StatTrak™ Kills: 4"]);
}

#[tokio::test]
async fn redelivered_death_counts_once() {
    let router = router();
    let mut bow = Item::new("BOW");
    let entity = Uuid::new_v4();

    assert_eq!(kill(&router, entity, &mut bow), RouteOutcome::Applied { updated: 1 });
    assert_eq!(kill(&router, entity, &mut bow), RouteOutcome::Duplicate);
    assert_eq!(kill(&router, Uuid::new_v4(), &mut bow), RouteOutcome::Applied { updated: 1 });

    assert_eq!(lore(&bow), vec!["§d StatTrak™ Kills: 2"]);
}

#[tokio::test]
async fn key_is_accepted_again_after_release() {
    let config = RuntimeConfig {
        release_delay: Duration::from_millis(20),
        ..RuntimeConfig::default()
    };
    let router = EventRouter::new(config).unwrap();
    let mut axe = Item::new("IRON_AXE");
    let entity = Uuid::new_v4();

    assert_eq!(kill(&router, entity, &mut axe), RouteOutcome::Applied { updated: 1 });
    tokio::time::sleep(Duration::from_millis(250)).await;
    assert_eq!(kill(&router, entity, &mut axe), RouteOutcome::Applied { updated: 1 });

    assert_eq!(lore(&axe), vec!["§d StatTrak™ Kills: 2"]);
}

#[tokio::test]
async fn death_without_killer_is_ignored_but_claimed() {
    let router = router();
    let entity = Uuid::new_v4();

    let outcome = router.route(Occurrence::EntityDied {
        entity,
        weapon: None,
    });
    assert_eq!(outcome, RouteOutcome::Ignored);

    let mut sword = Item::new("STONE_SWORD");
    assert_eq!(kill(&router, entity, &mut sword), RouteOutcome::Duplicate);
    assert!(lore(&sword).is_empty());
}

#[tokio::test]
async fn kill_with_non_weapon_changes_nothing() {
    let router = router();
    let mut pickaxe = Item::new("DIAMOND_PICKAXE").with_lore(["Efficiency IV"]);

    assert_eq!(kill(&router, Uuid::new_v4(), &mut pickaxe), RouteOutcome::Ignored);
    assert_eq!(lore(&pickaxe), vec!["Efficiency IV"]);
}

#[tokio::test]
async fn mining_counts_on_tools_only() {
    let router = router();
    let mut pickaxe = Item::new("IRON_PICKAXE");
    let mut sword = Item::new("IRON_SWORD");

    let mined = router.route(Occurrence::BlockBroken {
        position: BlockPos::new(10, 64, -3),
        tool: &mut pickaxe,
    });
    let swung = router.route(Occurrence::BlockBroken {
        position: BlockPos::new(11, 64, -3),
        tool: &mut sword,
    });

    assert_eq!(mined, RouteOutcome::Applied { updated: 1 });
    assert_eq!(swung, RouteOutcome::Ignored);
    assert_eq!(lore(&pickaxe), vec!["§d StatTrak™ Blocks Mined: 1"]);
    assert!(lore(&sword).is_empty());
}

#[tokio::test]
async fn same_block_redelivered_is_skipped() {
    let router = router();
    let mut shovel = Item::new("WOODEN_SHOVEL");
    let position = BlockPos::new(0, 70, 0);

    for _ in 0..3 {
        router.route(Occurrence::BlockBroken {
            position,
            tool: &mut shovel,
        });
    }

    assert_eq!(lore(&shovel), vec!["§d StatTrak™ Blocks Mined: 1"]);
}

#[tokio::test]
async fn damage_is_split_across_armor() {
    let router = router();
    let mut helmet = Item::new("IRON_HELMET");
    let mut boots = Item::new("IRON_BOOTS");
    let mut elytra = Item::new("ELYTRA");

    let outcome = router.route(Occurrence::EntityDamaged {
        victim: Uuid::new_v4(),
        amount: 3.0,
        armor: vec![held(&mut helmet), held(&mut elytra), held(&mut boots)],
    });

    assert_eq!(outcome, RouteOutcome::Applied { updated: 2 });
    assert_eq!(lore(&helmet), vec!["§d StatTrak™ Damage Taken: 1.5"]);
    assert_eq!(lore(&boots), vec!["§d StatTrak™ Damage Taken: 1.5"]);
    assert!(lore(&elytra).is_empty());
}

#[tokio::test]
async fn damage_accumulates_and_whole_totals_render_as_integers() {
    let router = router();
    let mut chestplate = Item::new("DIAMOND_CHESTPLATE").with_lore(["§d StatTrak™ Damage Taken: 2.5"]);

    router.route(Occurrence::EntityDamaged {
        victim: Uuid::new_v4(),
        amount: 0.5,
        armor: vec![held(&mut chestplate)],
    });
    assert_eq!(lore(&chestplate), vec!["§d StatTrak™ Damage Taken: 3"]);

    router.route(Occurrence::EntityDamaged {
        victim: Uuid::new_v4(),
        amount: 1.25,
        armor: vec![held(&mut chestplate)],
    });
    assert_eq!(lore(&chestplate), vec!["§d StatTrak™ Damage Taken: 4.3"]);
}

#[tokio::test]
async fn damage_is_never_deduplicated() {
    let router = router();
    let mut leggings = Item::new("LEATHER_LEGGINGS");
    let victim = Uuid::new_v4();

    for _ in 0..2 {
        let outcome = router.route(Occurrence::EntityDamaged {
            victim,
            amount: 1.0,
            armor: vec![held(&mut leggings)],
        });
        assert_eq!(outcome, RouteOutcome::Applied { updated: 1 });
    }

    assert_eq!(lore(&leggings), vec!["§d StatTrak™ Damage Taken: 2"]);
}

#[tokio::test]
async fn damage_without_trackable_armor_is_ignored() {
    let router = router();
    let mut pumpkin = Item::new("CARVED_PUMPKIN");

    let bare = router.route(Occurrence::EntityDamaged {
        victim: Uuid::new_v4(),
        amount: 4.0,
        armor: Vec::new(),
    });
    let costume = router.route(Occurrence::EntityDamaged {
        victim: Uuid::new_v4(),
        amount: 4.0,
        armor: vec![held(&mut pumpkin)],
    });

    assert_eq!(bare, RouteOutcome::Ignored);
    assert_eq!(costume, RouteOutcome::Ignored);
    assert!(lore(&pumpkin).is_empty());
}

#[tokio::test]
async fn non_finite_damage_is_ignored() {
    let router = router();
    let mut boots = Item::new("GOLDEN_BOOTS");

    let outcome = router.route(Occurrence::EntityDamaged {
        victim: Uuid::new_v4(),
        amount: f64::NAN,
        armor: vec![held(&mut boots)],
    });

    assert_eq!(outcome, RouteOutcome::Ignored);
    assert!(lore(&boots).is_empty());
}

#[tokio::test]
async fn objects_without_metadata_are_untouched() {
    let router = router();
    let mut sword = Item::without_metadata("WOODEN_SWORD");
    let mut helmet = Item::without_metadata("TURTLE_HELMET");
    let mut boots = Item::new("IRON_BOOTS");

    assert_eq!(kill(&router, Uuid::new_v4(), &mut sword), RouteOutcome::Ignored);
    assert_eq!(sword.lore, None);

    // The piece without metadata takes no share of the damage.
    let outcome = router.route(Occurrence::EntityDamaged {
        victim: Uuid::new_v4(),
        amount: 2.0,
        armor: vec![held(&mut helmet), held(&mut boots)],
    });
    assert_eq!(outcome, RouteOutcome::Applied { updated: 1 });
    assert_eq!(helmet.lore, None);
    assert_eq!(lore(&boots), vec!["§d StatTrak™ Damage Taken: 2"]);
}

#[tokio::test]
async fn malformed_counter_restarts_from_zero() {
    let router = router();
    let mut sword = Item::new("IRON_SWORD").with_lore(["§d StatTrak™ Kills: lots", "Smite III"]);

    kill(&router, Uuid::new_v4(), &mut sword);

    assert_eq!(lore(&sword), vec!["§d StatTrak™ Kills: 1", "Smite III"]);
}

#[tokio::test]
async fn custom_names_and_marker() {
    let config = RuntimeConfig {
        lore_marker: "§6".into(),
        names: StatNames {
            kills: "Confirmed Kills".into(),
            ..StatNames::default()
        },
        ..RuntimeConfig::default()
    };
    let router = EventRouter::new(config).unwrap();
    let mut sword = Item::new("GOLDEN_SWORD").with_lore(["§d Confirmed Kills: 9"]);

    kill(&router, Uuid::new_v4(), &mut sword);

    assert_eq!(lore(&sword), vec!["§6 Confirmed Kills: 10"]);
}

#[tokio::test]
async fn custom_handler_set_replaces_defaults() {
    let router = EventRouter::builder().handler(KillHandler).build().unwrap();
    let mut pickaxe = Item::new("IRON_PICKAXE");

    let outcome = router.route(Occurrence::BlockBroken {
        position: BlockPos::new(1, 2, 3),
        tool: &mut pickaxe,
    });

    assert_eq!(outcome, RouteOutcome::Ignored);
    assert!(lore(&pickaxe).is_empty());
}

/// Appends a fixed line to the killer's weapon.
struct Engraving {
    line: &'static str,
    priority: i32,
}

impl OccurrenceHandler for Engraving {
    fn name(&self) -> &'static str {
        self.line
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn handles(&self, kind: OccurrenceKind) -> bool {
        kind == OccurrenceKind::EntityDied
    }

    fn apply(&self, occurrence: &mut Occurrence<'_>, _ctx: &HandlerContext<'_>) -> usize {
        let Occurrence::EntityDied {
            weapon: Some(weapon),
            ..
        } = occurrence
        else {
            return 0;
        };
        let Some(lore) = weapon.lore() else {
            return 0;
        };
        let mut lines = lore.to_vec();
        lines.push(self.line.to_string());
        weapon.commit_lore(lines);
        1
    }
}

#[tokio::test]
async fn handlers_on_one_kind_run_in_priority_order() {
    let router = EventRouter::builder()
        .handler(Engraving {
            line: "late",
            priority: 10,
        })
        .handler(KillHandler)
        .handler(Engraving {
            line: "early",
            priority: -5,
        })
        .build()
        .unwrap();
    let mut sword = Item::new("GOLDEN_SWORD");

    let outcome = kill(&router, Uuid::new_v4(), &mut sword);

    assert_eq!(outcome, RouteOutcome::Applied { updated: 3 });
    assert_eq!(
        lore(&sword),
        vec!["early", "§d StatTrak™ Kills: 1", "late"]
    );
}

#[tokio::test]
async fn metrics_track_outcomes() {
    let router = router();
    let mut sword = Item::new("IRON_SWORD");
    let mut helmet = Item::new("IRON_HELMET");
    let mut boots = Item::new("IRON_BOOTS");
    let entity = Uuid::new_v4();

    kill(&router, entity, &mut sword);
    kill(&router, entity, &mut sword);
    router.route(Occurrence::EntityDied {
        entity: Uuid::new_v4(),
        weapon: None,
    });
    router.route(Occurrence::EntityDamaged {
        victim: Uuid::new_v4(),
        amount: 1.0,
        armor: vec![held(&mut helmet), held(&mut boots)],
    });

    assert_eq!(
        router.metrics().snapshot(),
        MetricsSnapshot {
            routed: 3,
            duplicates: 1,
            ignored: 1,
            objects_updated: 3,
        }
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn concurrent_redeliveries_update_one_weapon() {
    const THREADS: usize = 8;
    let router = Arc::new(router());
    let barrier = Arc::new(Barrier::new(THREADS));
    let entity = Uuid::new_v4();

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let router = Arc::clone(&router);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                // Each delivery arrives with its own view of the weapon.
                let mut sword = Item::new("NETHERITE_SWORD");
                barrier.wait();
                let outcome = kill(&router, entity, &mut sword);
                (outcome, sword)
            })
        })
        .collect();

    let results: Vec<(RouteOutcome, Item)> =
        handles.into_iter().map(|h| h.join().unwrap()).collect();

    let applied: Vec<_> = results
        .iter()
        .filter(|(outcome, _)| *outcome == RouteOutcome::Applied { updated: 1 })
        .collect();
    assert_eq!(applied.len(), 1);
    assert_eq!(lore(&applied[0].1), vec!["§d StatTrak™ Kills: 1"]);
    assert_eq!(router.metrics().duplicates(), (THREADS - 1) as u64);
}

#[test]
fn router_requires_a_runtime() {
    assert!(EventRouter::new(RuntimeConfig::default()).is_err());
}
