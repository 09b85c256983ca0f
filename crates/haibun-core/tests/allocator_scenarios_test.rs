use haibun_core::*;

fn allocated(customers: &[CustomerRecord]) -> Vec<f64> {
    customers.iter().map(|c| c.allocated).collect()
}

#[test]
fn test_capped_customer_frees_stock_for_others() {
    let mut customers =
        vec![CustomerRecord::new("north", 0.6, 100.0), CustomerRecord::new("south", 0.4, 20.0)];

    allocate(&mut customers, 100.0).unwrap();

    assert_eq!(allocated(&customers), vec![80.0, 20.0]);
    assert_eq!(customers.iter().map(|c| c.allocated).sum::<f64>(), 100.0);
}

#[test]
fn test_excess_stock_stays_unallocated_when_demand_is_met() {
    let mut customers =
        vec![CustomerRecord::new("north", 0.5, 10.0), CustomerRecord::new("south", 0.5, 10.0)];

    let outcome = allocate(&mut customers, 30.0).unwrap();

    assert_eq!(allocated(&customers), vec![10.0, 10.0]);
    assert_eq!(outcome.unallocated, 10.0);
}

#[test]
fn test_single_zero_ratio_customer() {
    let mut customers = vec![CustomerRecord::new("north", 0.0, 5.0)];

    let outcome = allocate(&mut customers, 10.0).unwrap();

    assert_eq!(allocated(&customers), vec![0.0]);
    assert_eq!(outcome.termination, Termination::ZeroWeight);
}

#[test]
fn test_degenerate_inputs_yield_zero_allocations() {
    let mut empty: Vec<CustomerRecord> = Vec::new();
    let outcome = allocate(&mut empty, 50.0).unwrap();
    assert_eq!(outcome.unallocated, 50.0);

    let mut customers =
        vec![CustomerRecord::new("north", 0.7, 10.0), CustomerRecord::new("south", 0.3, 10.0)];
    allocate(&mut customers, 0.0).unwrap();
    assert_eq!(allocated(&customers), vec![0.0, 0.0]);

    let mut customers =
        vec![CustomerRecord::new("north", 0.0, 10.0), CustomerRecord::new("south", 0.0, 10.0)];
    allocate(&mut customers, 15.0).unwrap();
    assert_eq!(allocated(&customers), vec![0.0, 0.0]);
}

#[test]
fn test_zero_ratio_customer_excluded_from_redistribution() {
    let mut customers = vec![
        CustomerRecord::new("north", 1.0, 5.0),
        CustomerRecord::new("south", 0.0, 100.0),
    ];

    let outcome = allocate(&mut customers, 50.0).unwrap();

    assert_eq!(allocated(&customers), vec![5.0, 0.0]);
    assert_eq!(outcome.unallocated, 45.0);
}

#[test]
fn test_rounding_drift_is_accepted_by_default() {
    // Three equal shares of 10 units: 3.33.. each rounds down to 3.
    let mut customers = vec![
        CustomerRecord::new("a", 1.0, 100.0),
        CustomerRecord::new("b", 1.0, 100.0),
        CustomerRecord::new("c", 1.0, 100.0),
    ];

    allocate(&mut customers, 10.0).unwrap();

    assert_eq!(allocated(&customers), vec![3.0, 3.0, 3.0]);
}

#[test]
fn test_reconciliation_restores_total() {
    let config = AllocatorConfig { reconcile: true, ..AllocatorConfig::default() };
    let allocator = Allocator::new(config).unwrap();
    let mut customers = vec![
        CustomerRecord::new("a", 1.0, 100.0),
        CustomerRecord::new("b", 1.0, 100.0),
        CustomerRecord::new("c", 1.0, 100.0),
    ];

    allocator.allocate(&mut customers, 10.0).unwrap();

    assert_eq!(customers.iter().map(|c| c.allocated).sum::<f64>(), 10.0);
    assert!(customers.iter().all(|c| c.allocated == 3.0 || c.allocated == 4.0));
}

#[test]
fn test_half_up_rounding_mode() {
    let config = AllocatorConfig { rounding: RoundingMode::HalfUp, ..AllocatorConfig::default() };
    let allocator = Allocator::new(config).unwrap();
    let mut customers =
        vec![CustomerRecord::new("a", 0.5, 100.0), CustomerRecord::new("b", 0.5, 100.0)];

    allocator.allocate(&mut customers, 5.0).unwrap();
    assert_eq!(allocated(&customers), vec![3.0, 3.0]);

    let mut customers =
        vec![CustomerRecord::new("a", 0.5, 100.0), CustomerRecord::new("b", 0.5, 100.0)];
    allocate(&mut customers, 5.0).unwrap();
    assert_eq!(allocated(&customers), vec![2.0, 2.0]);
}

#[test]
fn test_discretion_split_feeds_allocator() {
    let split = StockSplit::new(100, 0.3).unwrap();
    let mut customers = vec![
        CustomerRecord::new("north", 0.5, 60.0),
        CustomerRecord::new("south", 0.3, 10.0),
        CustomerRecord::new("west", 0.2, 5.0),
    ];

    allocate(&mut customers, split.logic as f64).unwrap();
    let summary = summarize(&customers, &split);

    assert_eq!(allocated(&customers), vec![55.0, 10.0, 5.0]);
    assert_eq!(summary.logic_stock, 70);
    assert_eq!(summary.total_allocated, 70.0);
    assert_eq!(summary.logic_unallocated, 0.0);
    assert_eq!(summary.not_allocated_total, 30.0);
}

#[test]
fn test_rejected_call_is_a_no_op() {
    let mut customers = vec![
        CustomerRecord::new("north", 0.5, 10.0),
        CustomerRecord::new("south", 0.5, -1.0),
    ];
    let before = customers.clone();

    let first = allocate(&mut customers, 10.0).unwrap_err();
    let second = allocate(&mut customers, 10.0).unwrap_err();

    assert_eq!(first, second);
    assert_eq!(customers, before);
}
