use dotadle::{
    present, rank_hardest, OutputFormat, Roster, RosterError, Schema, SimulationConfig, Simulator,
    YearBounds,
};

const HEROES: &str = r#"[
    {"championName": "Axe", "gender": "Male", "attribute": "Strength", "rangeType": "Melee",
     "complexity": 1, "releaseYear": 2004, "species": ["Oglodi"], "lane": ["Offlane"]},
    {"championName": "Crystal Maiden", "gender": "Female", "attribute": "Intelligence",
     "rangeType": "Ranged", "complexity": 1, "releaseYear": 2004, "species": ["Human"],
     "lane": ["Support"]},
    {"championName": "Lina", "gender": "Female", "attribute": "Intelligence", "rangeType": "Ranged",
     "complexity": 1, "releaseYear": 2005, "species": ["Human"], "lane": ["Mid", "Support"]},
    {"championName": "Marci", "gender": "Female", "attribute": "Universal", "rangeType": "Melee",
     "complexity": 2, "releaseYear": 2021, "species": ["Human"], "lane": ["Support", "Offlane"]},
    {"championName": "Muerta", "gender": "Female", "attribute": "Intelligence",
     "rangeType": "Ranged", "complexity": 2, "releaseYear": 2023, "species": ["Revenant"],
     "lane": ["Carry"]}
]"#;

fn roster() -> Roster {
    Roster::from_json_str(HEROES, Schema::dotadle(), &YearBounds::default()).unwrap()
}

#[test]
fn every_guess_is_scored() {
    let roster = roster();
    let reports = Simulator::new(&roster, SimulationConfig::default()).unwrap().run().unwrap();

    assert_eq!(
        reports.iter().map(|r| r.guess.as_str()).collect::<Vec<_>>(),
        vec!["Axe", "Crystal Maiden", "Lina", "Marci", "Muerta"]
    );

    for report in &reports {
        assert_eq!(report.pool.len(), roster.len() - 1);
        for (answer, plausibles) in &report.pool {
            assert!(plausibles.contains(answer));
            assert!(!plausibles.contains(&report.guess));
        }
    }

    // Maiden vs Lina: every categorical matches, Lina is newer and her lanes
    // only overlap, so Lina is the one hero left
    let maiden = &reports[1];
    let (_, lina_pool) = maiden.pool.iter().find(|(answer, _)| answer == "Lina").unwrap();
    assert_eq!(lina_pool, &vec!["Lina".to_owned()]);
}

#[test]
fn renders_every_format() {
    let roster = roster();
    let reports = Simulator::new(&roster, SimulationConfig::default()).unwrap().run().unwrap();

    for format in [
        OutputFormat::Csv,
        OutputFormat::Basic,
        OutputFormat::Score,
        OutputFormat::Verbose,
        OutputFormat::Unambiguous,
        OutputFormat::Hardest,
    ] {
        let mut out = Vec::new();
        present(&mut out, format, true, &reports).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Axe"), "{format:?}: {text}");
    }

    let hardest = rank_hardest(reports.iter().map(|r| &r.pool));
    assert_eq!(hardest.len(), roster.len());
    assert!(hardest.iter().all(|d| d.guesses == roster.len()));
}

#[test]
fn missing_roster_file() {
    let result = Roster::load("does/not/exist.json", Schema::dotadle(), &YearBounds::default());
    assert!(matches!(result, Err(RosterError::Io { .. })));
}
