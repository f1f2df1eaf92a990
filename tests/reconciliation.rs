use parity::defaults::{self, ParityConfig};
use parity::parity::{
    reconcile, reconcile_inventories, reconcile_tokens, resolve_aliases, AliasTable, Category,
    ResolvedPair, TokenSet,
};

fn set(items: &[&str]) -> TokenSet {
    items.iter().map(|s| s.to_string()).collect()
}

fn winforms_names() -> Vec<&'static str> {
    vec![
        "SAV_BoxViewer.cs",
        "SAV_BoxViewer.Designer.cs",
        "SAV_Trainer8.cs",
        "SAV_Trainer9.cs",
        "SAV_PokedexXY.cs",
        "SAV_PokedexORAS.cs",
        "SAV_MysteryGiftDB.cs",
        "SAV_FolderList.cs",
        "SAV_Raid8.cs",
        "SAV_Raid9.cs",
        "SAV_Roamer6.cs",
        "SAV_Misc4.cs",
        "SAV_Wondercard.cs",
        "Main.cs",
    ]
}

fn avalonia_names() -> Vec<&'static str> {
    vec![
        "BoxViewerViewModel.cs",
        "TrainerEditorViewModel.cs",
        "Pokedex6EditorViewModel.cs",
        "MysteryGiftDatabaseViewModel.cs",
        "RaidEditorViewModel.cs",
        "Raid9EditorViewModel.cs",
        "Roamer6EditorViewModel.cs",
        "Misc4EditorViewModel.cs",
        "MysteryGiftEditorViewModel.cs",
        "SettingsViewModel.cs",
        "PokemonEditorViewModel.Stats.cs",
    ]
}

#[test]
fn preset_reconciles_migration_inventory() {
    let result = reconcile_inventories(winforms_names(), avalonia_names(), &ParityConfig::default());

    assert_eq!(result.summary.left_count, 12);
    assert_eq!(result.summary.right_count, 9);
    assert_eq!(result.matched, vec!["BoxViewer"]);

    assert_eq!(
        result.alias_resolved,
        vec![
            ResolvedPair::new("MysteryGiftDB", "MysteryGiftDatabase"),
            ResolvedPair::new("PokedexORAS", "Pokedex6Ed"),
            ResolvedPair::new("Raid8", "RaidEd"),
            ResolvedPair::new("Trainer8", "TrainerEd"),
            ResolvedPair::new("Wondercard", "MysteryGiftEd"),
        ]
    );

    // PokedexXY lost Pokedex6Ed to PokedexORAS, declared earlier.
    assert_eq!(
        result.fuzzy_resolved,
        vec![
            ResolvedPair::new("Misc4", "Misc4Ed"),
            ResolvedPair::new("Raid9", "Raid9Ed"),
            ResolvedPair::new("Roamer6", "Roamer6Ed"),
        ]
    );
    assert_eq!(
        result.unresolved.missing,
        vec!["FolderList", "PokedexXY", "Trainer9"]
    );
    assert!(result.unresolved.extra.is_empty());
}

#[test]
fn trainer_resolves_through_alias() {
    let aliases: AliasTable = [("Trainer8", "TrainerEd")].into_iter().collect();
    let r = reconcile_tokens(&set(&["Trainer8"]), &set(&["TrainerEd"]), &aliases, true);
    assert_eq!(r.alias_resolved, vec![ResolvedPair::new("Trainer8", "TrainerEd")]);
}

#[test]
fn box_viewer_matches_exactly() {
    let r = reconcile_tokens(&set(&["BoxViewer"]), &set(&["BoxViewer"]), &AliasTable::new(), true);
    assert_eq!(r.matched, vec!["BoxViewer"]);
}

#[test]
fn alias_needs_no_substring_relation() {
    let aliases: AliasTable = [("PokedexXY", "Pokedex6Ed")].into_iter().collect();
    let r = reconcile_tokens(&set(&["PokedexXY"]), &set(&["Pokedex6Ed"]), &aliases, true);
    assert_eq!(r.alias_resolved, vec![ResolvedPair::new("PokedexXY", "Pokedex6Ed")]);
    assert!(r.fuzzy_resolved.is_empty());
}

#[test]
fn folder_list_without_counterpart_is_unresolved() {
    let r = reconcile_tokens(&set(&["FolderList"]), &set(&["TrainerEd"]), &AliasTable::new(), true);
    assert_eq!(r.category_of("FolderList"), Some(Category::Unresolved));
}

#[test]
fn raid_rename_escapes_fuzzy_pass() {
    let r = reconcile_tokens(&set(&["Raid8"]), &set(&["RaidEd"]), &AliasTable::new(), true);
    assert!(r.fuzzy_resolved.is_empty());
    assert_eq!(r.unresolved.missing, vec!["Raid8"]);
    assert_eq!(r.unresolved.extra, vec!["RaidEd"]);
}

#[test]
fn exact_pass_partitions_union() {
    let a = set(&["A", "B", "Shared", "x"]);
    let b = set(&["Shared", "X", "Y"]);
    let split = reconcile(&a, &b);

    let union: TokenSet = a.union(&b).cloned().collect();
    let pieces = [&split.matched, &split.only_in_a, &split.only_in_b];
    for token in &union {
        let hits = pieces.iter().filter(|p| p.contains(token)).count();
        assert_eq!(hits, 1, "{}", token);
    }
    assert_eq!(pieces.iter().map(|p| p.len()).sum::<usize>(), union.len());
}

#[test]
fn full_run_categorizes_every_token_once() {
    let config = ParityConfig::default();
    let left = parity::parity::collect_tokens(winforms_names(), &config.left.convention);
    let right = parity::parity::collect_tokens(avalonia_names(), &config.right.convention);
    let r = reconcile_tokens(&left, &right, &config.aliases, true);

    let in_pairs = |pairs: &[ResolvedPair], t: &str| {
        pairs.iter().any(|p| p.source == t || p.target == t)
    };

    for token in left.union(&right) {
        let count = [
            r.matched.contains(token),
            in_pairs(&r.alias_resolved, token.as_str()),
            in_pairs(&r.fuzzy_resolved, token.as_str()),
            r.unresolved.missing.contains(token) || r.unresolved.extra.contains(token),
        ]
        .iter()
        .filter(|hit| **hit)
        .count();
        assert_eq!(count, 1, "{}", token);
    }
}

#[test]
fn alias_pass_is_idempotent_on_its_leftovers() {
    let aliases = defaults::preset("winforms-avalonia").unwrap().aliases;
    let a = set(&["Trainer7", "Trainer8", "Trainer9", "PokedexSV", "PokedexSVKitakami", "Solo"]);
    let b = set(&["TrainerEd", "PokedexGen9Ed", "trainered", "Other"]);

    let first = resolve_aliases(&a, &b, &aliases);
    assert_eq!(first.resolved.len(), 3);

    let second = resolve_aliases(&first.still_only_in_a, &first.still_only_in_b, &aliases);
    assert!(second.resolved.is_empty());
}

#[test]
fn fuzzy_pairing_is_fixed_by_sort_order() {
    let r = reconcile_tokens(
        &set(&["Pokedex", "Pokedex8"]),
        &set(&["Pokedex8bEd", "Pokedex8Ed", "Pokedex7Ed"]),
        &AliasTable::new(),
        true,
    );
    assert_eq!(
        r.fuzzy_resolved,
        vec![
            ResolvedPair::new("Pokedex", "Pokedex7Ed"),
            ResolvedPair::new("Pokedex8", "Pokedex8Ed"),
        ]
    );
    assert_eq!(r.unresolved.extra, vec!["Pokedex8bEd"]);
}
