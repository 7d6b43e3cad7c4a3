pub(crate) const HEADER: &str =
    "#,Name,Type 1,Type 2,Total,HP,Attack,Defense,Sp. Atk,Sp. Def,Speed";

pub(crate) const STARTERS: &str = "\
#,Name,Type 1,Type 2,Total,HP,Attack,Defense,Sp. Atk,Sp. Def,Speed
1,Bulbasaur,Grass,Poison,318,45,49,49,65,65,45
2,Ivysaur,Grass,Poison,405,60,62,63,80,80,60
4,Charmander,Fire,,309,39,52,43,60,50,65
7,Squirtle,Water,,314,44,48,65,50,64,43
";

pub(crate) fn starters() -> super::StatSource {
    super::StatSource::try_from_reader("starters", STARTERS.as_bytes())
        .expect("fixture must parse")
}
