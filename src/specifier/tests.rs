use super::*;

fn content_of(text: &str) -> Vec<Index> {
    resolve(text).unwrap().content().unwrap().to_vec()
}

fn resolve_with(implicit: &str, explicit: &str) -> Result<Vec<Index>, ResolveError> {
    let sibling = resolve(explicit).unwrap();
    let mut spec = resolve(implicit).unwrap();
    spec.resolve_against(&sibling)?;
    Ok(spec.content().unwrap().to_vec())
}

#[test]
fn test_grammar_classification() {
    let cases = [
        ("1", Grammar::SimpleExplicit),
        ("2,3,5", Grammar::SimpleExplicit),
        ("3..7", Grammar::SimpleRange),
        ("0:2..10", Grammar::StepToEnd),
        ("4:3:5", Grammar::StepRange),
        ("..", Grammar::RangeReuse),
        ("8..", Grammar::OffsetRangeReuse),
        ("0..#", Grammar::LengthForward),
        ("#..4", Grammar::LengthBackward),
        ("1:2:#", Grammar::StepRangeLengthReuse),
    ];

    for (text, grammar) in cases {
        let spec = resolve(text).unwrap();
        assert_eq!(spec.grammar(), grammar, "{}", text);
        assert_eq!(spec.family(), grammar.family());
        assert_eq!(spec.text(), text);
    }
}

#[test]
fn test_grammars_are_disjoint() {
    for text in ["7", "1,2", "3..7", "0:2..10", "4:3:5", "..", "8..", "0..#", "#..4", "1:2:#"] {
        let matching: Vec<_> = Grammar::ALL.iter()
            .filter(|g| g.capture(text).is_some())
            .collect();
        assert_eq!(matching.len(), 1, "{} matched {:?}", text, matching);
    }
}

#[test]
fn test_precedence_puts_explicit_first() {
    let families: Vec<_> = Grammar::ALL.iter().map(|g| g.family()).collect();
    let first_implicit = families.iter()
        .position(|f| *f == Family::Implicit)
        .unwrap();

    assert!(families[first_implicit..].iter().all(|f| *f == Family::Implicit));
}

#[test]
fn test_simple_explicit_preserves_order() {
    assert_eq!(content_of("2,3,5,7,11"), vec![2, 3, 5, 7, 11]);
    assert_eq!(content_of("9,1,9"), vec![9, 1, 9]);
    assert_eq!(content_of("42"), vec![42]);
}

#[test]
fn test_simple_explicit_captures_list_elements() {
    let spec = resolve("10,20,30").unwrap();
    assert_eq!(spec.captures(), &["10", "20", "30"]);
}

#[test]
fn test_simple_range_directions() {
    assert_eq!(content_of("3..7"), vec![3, 4, 5, 6, 7]);
    assert_eq!(content_of("7..3"), vec![7, 6, 5, 4, 3]);
    assert_eq!(content_of("5..5"), vec![5]);
}

#[test]
fn test_step_to_end_boundary() {
    assert_eq!(content_of("0:2..10"), vec![0, 2, 4, 6, 8, 10]);
    assert_eq!(content_of("0:2..9"), vec![0, 2, 4, 6, 8]);
    assert_eq!(content_of("3:5..3"), vec![3]);
}

#[test]
fn test_step_to_end_may_be_empty() {
    let spec = resolve("10:1..2").unwrap();
    assert_eq!(spec.content(), Some(&[][..]));
    assert_eq!(spec.len(), Some(0));
}

#[test]
fn test_step_to_end_rejects_zero_step() {
    assert_eq!(
        resolve("0:0..5"),
        Err(ResolveError::ZeroStep("stepToEnd"))
    );
    /* Never enters the loop, so a zero step is harmless */
    assert_eq!(content_of("6:0..5"), Vec::<Index>::new());
}

#[test]
fn test_step_to_end_stops_at_overflow() {
    let max = Index::MAX;
    let text = format!("{}:{}..{}", max - 1, 5, max);
    assert_eq!(content_of(&text), vec![max - 1]);
}

#[test]
fn test_step_range_has_length_plus_one_terms() {
    let content = content_of("4:3:5");
    assert_eq!(content.len(), 6);
    assert_eq!(content, vec![4, 7, 10, 13, 16, 19]);

    assert_eq!(content_of("1:1:0"), vec![1]);
    assert_eq!(content_of("2:0:2"), vec![2, 2, 2]);
}

#[test]
fn test_range_reuse() {
    assert_eq!(resolve_with("..", "1..3"), Ok(vec![1, 2, 3]));
    assert_eq!(resolve_with("..", "5,1,4"), Ok(vec![5, 1, 4]));
}

#[test]
fn test_offset_range_reuse() {
    assert_eq!(resolve_with("10..", "0..3"), Ok(vec![10, 11, 12, 13]));
    assert_eq!(resolve_with("1..", "4,0,2"), Ok(vec![5, 1, 3]));
}

#[test]
fn test_length_forward_backward_symmetry() {
    assert_eq!(resolve_with("0..#", "10..14"), Ok(vec![0, 1, 2, 3, 4]));
    assert_eq!(resolve_with("#..4", "10..14"), Ok(vec![4, 3, 2, 1, 0]));
}

#[test]
fn test_length_backward_underflow() {
    assert_eq!(
        resolve_with("#..2", "0..4"),
        Err(ResolveError::IndexOutOfRange("lengthBackward"))
    );
}

#[test]
fn test_step_range_length_reuse_is_bounded_by_sibling_length() {
    /* The sibling's element count bounds the number of terms, so the
     * implicit side always matches the explicit side in length. */
    assert_eq!(resolve_with("0:2:#", "0..3"), Ok(vec![0, 2, 4, 6]));
    assert_eq!(resolve_with("5:10:#", "7"), Ok(vec![5]));
    assert_eq!(resolve_with("3:1:#", "1:1..0"), Ok(vec![]));
}

#[test]
fn test_step_range_length_reuse_differs_from_step_range() {
    /* `4:3:5` has six terms, `4:3:#` against a five-element sibling has five */
    let explicit = content_of("4:3:5");
    let implicit = resolve_with("4:3:#", "0..4").unwrap();

    assert_eq!(implicit.len(), 5);
    assert_eq!(&explicit[..5], &implicit[..]);
}

#[test]
fn test_implicit_is_unresolved_until_paired() {
    let spec = resolve("..").unwrap();
    assert!(spec.is_implicit());
    assert!(!spec.is_resolved());
    assert_eq!(spec.content(), None);
    assert_eq!(spec.len(), None);
    assert_eq!(spec.resolved(), Err(ResolveError::Unresolved("..".into())));
}

#[test]
fn test_implicit_against_implicit_fails() {
    let sibling = resolve("0..#").unwrap();
    let mut spec = resolve("..").unwrap();

    assert_eq!(
        spec.resolve_against(&sibling),
        Err(ResolveError::SiblingNotExplicit("..".into(), "0..#".into()))
    );
    assert!(!spec.is_resolved());
}

#[test]
fn test_explicit_cannot_be_resolved_against_sibling() {
    let sibling = resolve("0..9").unwrap();
    let mut spec = resolve("1,2").unwrap();

    assert_eq!(
        spec.resolve_against(&sibling),
        Err(ResolveError::AlreadyExplicit("1,2".into()))
    );
    assert_eq!(spec.content(), Some(&[1, 2][..]));
}

#[test]
fn test_implicit_grammar_needs_sibling() {
    let captures = vec!["3".to_string()];
    assert_eq!(
        Grammar::OffsetRangeReuse.expand(&captures, None),
        Err(ResolveError::MissingSibling("offsetRangeReuse"))
    );
    assert_eq!(
        Grammar::RangeReuse.expand(&[], None),
        Err(ResolveError::MissingSibling("rangeReuse"))
    );
}

#[test]
fn test_unrecognized_specifier() {
    for text in ["xyz", "1, 2", "1...3", "-1..3", "#..#", "1:2", ""] {
        assert_eq!(
            resolve(text),
            Err(ResolveError::UnrecognizedSpecifier(text.to_string())),
            "{:?}",
            text
        );
    }
}

#[test]
fn test_surrounding_whitespace_is_ignored() {
    let spec = resolve("  0..2 ").unwrap();
    assert_eq!(spec.text(), "0..2");
    assert_eq!(spec.content(), Some(&[0, 1, 2][..]));
}

#[test]
fn test_number_out_of_range() {
    let huge = "99999999999999999999999";
    assert_eq!(
        resolve(&format!("0..{}", huge)),
        Err(ResolveError::NumberOutOfRange(huge.to_string()))
    );
}

#[test]
fn test_from_str() {
    let spec: Specifier = "1..2".parse().unwrap();
    assert_eq!(spec.grammar(), Grammar::SimpleRange);
    assert_eq!(spec.to_string(), "1..2");
    assert!("what".parse::<Specifier>().is_err());
}
