//! End-to-end flows through the public API: book scenarios and the tick protocol.

use tick_exchange::{
    Exchange, ExchangeEvent, InMemoryEventSink, ManualTrader, MarketConfig, OrderBook,
    OrderIdGenerator, Side, SimConfig, Simulation, Trader,
};

fn init_log() {
    let _ = env_logger::try_init();
}

#[test]
fn resting_buy_then_crossing_sell_empties_book() {
    let mut ids = OrderIdGenerator::new();
    let mut book = OrderBook::new();
    assert!(book.add_order(ids.new_order(Side::Buy, 10, 5)).is_empty());
    assert_eq!(book.best_bid(), 5);

    let executions = book.add_order(ids.new_order(Side::Sell, 10, 5));
    assert_eq!(executions.len(), 1);
    assert_eq!(executions[0].side, Side::Sell);
    assert_eq!(executions[0].quantity, 10);
    assert_eq!(executions[0].price, 5);
    assert!(!book.has_bid());
    assert!(!book.has_offer());
}

#[test]
fn aggressive_buy_trades_at_midpoint_and_leaves_resting_remainder() {
    let mut ids = OrderIdGenerator::new();
    let mut book = OrderBook::new();
    book.add_order(ids.new_order(Side::Sell, 10, 5));
    let executions = book.add_order(ids.new_order(Side::Buy, 4, 7));
    assert_eq!(executions.len(), 1);
    assert_eq!(executions[0].quantity, 4);
    assert_eq!(executions[0].price, 6);
    assert_eq!(book.quantity_for_level(5), 6);
    assert!(!book.has_bid());
}

#[test]
fn level_quantities_sum_per_price() {
    let mut ids = OrderIdGenerator::new();
    let mut book = OrderBook::new();
    book.add_order(ids.new_order(Side::Buy, 10, 9));
    book.add_order(ids.new_order(Side::Buy, 10, 10));
    book.add_order(ids.new_order(Side::Buy, 10, 10));
    assert_eq!(book.quantity_for_level(10), 20);
    assert_eq!(book.quantity_for_level(12), 0);
}

#[test]
fn cancel_removes_exactly_its_quantity() {
    let mut ids = OrderIdGenerator::new();
    let mut book = OrderBook::new();
    let first = ids.new_order(Side::Sell, 3, 8);
    let second = ids.new_order(Side::Sell, 4, 8);
    book.add_order(first.clone());
    book.add_order(second.clone());
    assert_eq!(book.quantity_for_level(8), 7);
    assert!(book.cancel_order(first.id));
    assert_eq!(book.quantity_for_level(8), 4);
    assert!(!book.cancel_order(first.id));
    assert_eq!(book.quantity_for_level(8), 4);
}

#[test]
fn manual_traders_settle_through_ticks() {
    init_log();
    let config = MarketConfig::default();
    let sink = InMemoryEventSink::new();
    let mut exchange = Exchange::new(config.clone()).with_event_sink(sink.clone());
    let mut t1 = ManualTrader::new(&config);
    t1.pen_order(Side::Buy, 10, 10);
    let mut t2 = ManualTrader::new(&config);
    t2.pen_order(Side::Sell, 10, 10);
    let a = exchange.add_trader(t1);
    let b = exchange.add_trader(t2);

    exchange.tick(); // tick all traders
    exchange.tick(); // perform first order
    exchange.tick(); // perform second order

    assert_eq!(
        exchange.trader(a).unwrap().account().money(),
        config.starting_capital - 100
    );
    assert_eq!(
        exchange.trader(b).unwrap().account().money(),
        config.starting_capital + 100
    );

    let events = sink.events();
    assert_eq!(events.len(), 3);
    assert!(matches!(events[0], ExchangeEvent::Accepted { tick: 2, .. }));
    assert!(matches!(events[1], ExchangeEvent::Accepted { tick: 3, .. }));
    match &events[2] {
        ExchangeEvent::Traded { tick, execution } => {
            assert_eq!(*tick, 3);
            assert_eq!(execution.quantity, 10);
            assert_eq!(execution.price, 10);
        }
        other => panic!("expected trade, got {:?}", other),
    }
    assert_eq!(exchange.tracked_orders(), 0);
}

#[test]
fn cancel_queued_behind_order_is_applied_after_admission() {
    init_log();
    let config = MarketConfig::default();
    let mut exchange = Exchange::new(config.clone());
    let t = exchange.add_trader(ManualTrader::new(&config));
    let order = exchange.new_order(Side::Sell, 5, 12);
    exchange.submit_order(t, order.clone()).unwrap();
    exchange.submit_cancel(t, order.id).unwrap();
    exchange.tick();
    assert_eq!(exchange.book().quantity_for_level(12), 5);
    exchange.tick();
    assert_eq!(exchange.book().quantity_for_level(12), 0);
    assert_eq!(exchange.pending_requests(), 0);
}

#[test]
fn long_simulation_keeps_book_uncrossed_and_owners_in_sync() {
    init_log();
    let mut sim = Simulation::new(SimConfig {
        seed: 2024,
        random_traders: 4,
        random_market_order_traders: 1,
        dealer_traders: 1,
        spread_traders: 1,
        trade_chance: 0.4,
        ..Default::default()
    })
    .unwrap();
    for _ in 0..3000 {
        sim.step();
        let book = sim.exchange().book();
        if book.has_bid() && book.has_offer() {
            assert!(book.best_bid() < book.best_offer());
        }
        assert_eq!(sim.exchange().tracked_orders(), book.order_count());
    }
}

#[test]
fn huge_priced_trade_settles_without_overflow() {
    init_log();
    let config = MarketConfig::default();
    let mut exchange = Exchange::new(config.clone());
    let seller = exchange.add_trader(ManualTrader::new(&config));
    let buyer = exchange.add_trader(ManualTrader::new(&config));
    let price = 1u64 << 62;
    let sell = exchange.new_order(Side::Sell, 2, price);
    let buy = exchange.new_order(Side::Buy, 2, price);
    exchange.submit_order(seller, sell).unwrap();
    exchange.submit_order(buyer, buy).unwrap();
    exchange.tick();
    exchange.tick();

    assert!(exchange.book().is_empty());
    let s = exchange.trader(seller).unwrap().account();
    assert_eq!(s.money(), i64::MAX);
    assert_eq!(s.shares(), config.starting_position - 2);
    let b = exchange.trader(buyer).unwrap().account();
    assert_eq!(b.money(), config.starting_capital - i64::MAX);
    assert_eq!(b.shares(), config.starting_position + 2);
}

#[test]
fn live_order_id_cannot_be_submitted_twice() {
    let config = MarketConfig::default();
    let mut exchange = Exchange::new(config.clone());
    let t = exchange.add_trader(ManualTrader::new(&config));
    let order = exchange.new_order(Side::Buy, 5, 10);
    exchange.submit_order(t, order.clone()).unwrap();
    exchange.tick();
    let mut again = order.clone();
    again.price = 8;
    assert!(matches!(
        exchange.submit_order(t, again),
        Err(tick_exchange::SimError::DuplicateOrder(id)) if id == order.id
    ));
    assert_eq!(exchange.book().order_count(), 1);
    assert_eq!(exchange.book().quantity_for_level(10), 5);
}
