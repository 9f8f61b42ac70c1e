#[cfg(test)]
mod tests {
    use crate::error::SlotError;
    use crate::slot_picker::TimeSlotPicker;
    use crate::slots::{group, AvailabilityTier, Period, SlotOffering, TimeSlot};
    use std::sync::{Arc, Mutex};

    fn slot(time: &str, capacity: u32, booked: u32) -> TimeSlot {
        TimeSlot::new(time, capacity, booked).expect("valid slot")
    }

    fn times(slots: &[TimeSlot]) -> Vec<&str> {
        slots.iter().map(|s| s.time()).collect()
    }

    #[test]
    fn test_group_preserves_order_and_omits_empty_periods() {
        let groups = group(vec![
            slot("9:00 AM", 5, 0),
            slot("2:00 PM", 5, 0),
            slot("10:00 AM", 5, 0),
        ]);
        assert_eq!(groups.len(), 2);
        assert_eq!(times(groups.get(Period::Morning).unwrap()), vec!["9:00 AM", "10:00 AM"]);
        assert_eq!(times(groups.get(Period::Afternoon).unwrap()), vec!["2:00 PM"]);
        assert!(groups.get(Period::Evening).is_none());
        assert_eq!(
            groups.periods().collect::<Vec<_>>(),
            vec![Period::Morning, Period::Afternoon]
        );
    }

    #[test]
    fn test_group_keeps_input_order_not_clock_order() {
        let groups = group(vec![slot("11:30 AM", 1, 0), slot("8:00 AM", 1, 0)]);
        assert_eq!(
            times(groups.get(Period::Morning).unwrap()),
            vec!["11:30 AM", "8:00 AM"]
        );
    }

    #[test]
    fn test_group_of_nothing_is_empty() {
        assert!(group(Vec::new()).is_empty());
    }

    #[test]
    fn test_period_boundaries() {
        assert_eq!(slot("8:00 AM", 1, 0).period(), Period::Morning);
        assert_eq!(slot("11:59 AM", 1, 0).period(), Period::Morning);
        assert_eq!(slot("12:00 PM", 1, 0).period(), Period::Afternoon);
        assert_eq!(slot("16:59", 1, 0).period(), Period::Afternoon);
        assert_eq!(slot("5:00 PM", 1, 0).period(), Period::Evening);
        assert_eq!(slot("19:30", 1, 0).period(), Period::Evening);
    }

    #[test]
    fn test_slots_outside_bookable_hours_are_rejected() {
        assert_eq!(
            TimeSlot::new("7:59 AM", 1, 0),
            Err(SlotError::OutsideBookableHours("7:59 AM".into()))
        );
        assert!(matches!(
            TimeSlot::new("8:00 PM", 1, 0),
            Err(SlotError::OutsideBookableHours(_))
        ));
        assert!(matches!(
            TimeSlot::new("noon", 1, 0),
            Err(SlotError::InvalidTimeLabel(_))
        ));
        assert_eq!(
            TimeSlot::new("9:00 AM", 2, 3),
            Err(SlotError::OverBooked { booked: 3, capacity: 2 })
        );
    }

    #[test]
    fn test_tiers_by_remaining_capacity() {
        assert_eq!(slot("9:00 AM", 10, 1).tier(), Some(AvailabilityTier::ManySpots));
        assert_eq!(slot("9:00 AM", 10, 7).tier(), Some(AvailabilityTier::FewSpots));
        assert_eq!(slot("9:00 AM", 10, 9).tier(), Some(AvailabilityTier::LastSpots));

        let full = slot("9:00 AM", 10, 10);
        assert!(!full.is_available());
        assert_eq!(full.tier(), None);
        assert_eq!(full.offering(), SlotOffering::Full);
    }

    #[test]
    fn test_tier_thresholds_are_inclusive_at_lower_bound() {
        assert_eq!(AvailabilityTier::from_ratio(0.75), Some(AvailabilityTier::ManySpots));
        assert_eq!(AvailabilityTier::from_ratio(0.25), Some(AvailabilityTier::FewSpots));
        assert_eq!(AvailabilityTier::from_ratio(0.01), Some(AvailabilityTier::LastSpots));
        assert_eq!(AvailabilityTier::from_ratio(0.0), None);
        assert_eq!(AvailabilityTier::ManySpots.to_string(), "many spots");
        assert_eq!(AvailabilityTier::FewSpots.label(), "few spots");
        assert_eq!(AvailabilityTier::LastSpots.label(), "last spots");
    }

    #[test]
    fn test_zero_capacity_is_not_offered() {
        let empty = slot("10:00 AM", 0, 0);
        assert!(!empty.is_available());
        assert_eq!(empty.availability_ratio(), None);
        assert_eq!(empty.tier(), None);
        assert_eq!(empty.offering(), SlotOffering::NotOffered);
    }

    #[test]
    fn test_closed_slot_is_unavailable() {
        let closed = slot("10:00 AM", 10, 0).closed(true);
        assert!(!closed.is_available());
        assert_eq!(closed.tier(), None);
        assert_eq!(closed.offering(), SlotOffering::Closed);
        assert_eq!(
            slot("10:00 AM", 4, 0).offering(),
            SlotOffering::Open(AvailabilityTier::ManySpots)
        );
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: TimeSlot =
            serde_json::from_str(r#"{"time":"6:30 PM","total_capacity":4,"booked_count":1}"#)
                .expect("valid slot json");
        assert_eq!(ok.period(), Period::Evening);
        assert!(!ok.is_closed());

        let bad = serde_json::from_str::<TimeSlot>(
            r#"{"time":"6:30 PM","total_capacity":1,"booked_count":2}"#,
        );
        assert!(bad.is_err());
    }

    #[test]
    fn test_offering_serialization() {
        let json = serde_json::to_value(SlotOffering::Open(AvailabilityTier::FewSpots)).unwrap();
        assert_eq!(json, serde_json::json!({"status": "open", "tier": "few_spots"}));
        let json = serde_json::to_value(SlotOffering::NotOffered).unwrap();
        assert_eq!(json, serde_json::json!({"status": "not_offered"}));
    }

    #[test]
    fn test_picker_ignores_unavailable_and_unknown_slots() {
        let picked = Arc::new(Mutex::new(Vec::<String>::new()));
        let sink = picked.clone();
        let mut picker = TimeSlotPicker::new(
            vec![
                slot("9:00 AM", 3, 3),
                slot("10:00 AM", 3, 1),
                slot("1:00 PM", 2, 0).closed(true),
            ],
            None,
            move |s| sink.lock().unwrap().push(s.time().to_string()),
        )
        .expect("unique labels");

        assert!(!picker.select("9:00 AM"), "full");
        assert!(!picker.select("1:00 PM"), "closed");
        assert!(!picker.select("3:00 PM"), "unknown");
        assert!(picker.select("10:00 AM"));
        assert_eq!(*picked.lock().unwrap(), vec!["10:00 AM".to_string()]);
        assert_eq!(picker.selected_time(), None);
    }

    #[test]
    fn test_picker_render_groups_and_flags() {
        let mut picker = TimeSlotPicker::new(
            vec![
                slot("9:00 AM", 10, 1),
                slot("6:00 PM", 10, 10),
                slot("10:00 AM", 10, 9),
            ],
            Some("10:00 AM".into()),
            |_| {},
        )
        .expect("unique labels");
        let view = picker.render();
        assert_eq!(view.len(), 2);
        assert_eq!(view[0].period, Period::Morning);
        assert_eq!(view[0].label, "Morning");
        assert_eq!(view[0].slots[0].tier_label, Some("many spots"));
        assert_eq!(view[0].slots[1].tier_label, Some("last spots"));
        assert!(view[0].slots[1].selected);
        assert_eq!(view[1].period, Period::Evening);
        assert!(view[1].slots[0].disabled);
        assert_eq!(view[1].slots[0].tier_label, None);

        picker.set_selected_time(None);
        assert!(picker.render().iter().flat_map(|p| &p.slots).all(|s| !s.selected));
    }

    #[test]
    fn test_picker_rejects_repeated_labels() {
        let result = TimeSlotPicker::new(
            vec![slot("9:00 AM", 3, 3), slot("9:00 AM", 3, 0)],
            None,
            |_| {},
        );
        assert!(matches!(
            result,
            Err(SlotError::DuplicateTime(ref time)) if time == "9:00 AM"
        ));

        let mut picker = TimeSlotPicker::new(vec![slot("9:00 AM", 3, 0)], None, |_| {})
            .expect("unique labels");
        assert_eq!(
            picker.set_time_slots(vec![slot("2:00 PM", 1, 0), slot("2:00 PM", 1, 1)]),
            Err(SlotError::DuplicateTime("2:00 PM".into()))
        );
        // The rejected list leaves the current slots in place
        assert!(picker.select("9:00 AM"));
        assert!(picker
            .set_time_slots(vec![slot("2:00 PM", 1, 0)])
            .is_ok());
        assert!(!picker.select("9:00 AM"));
        assert!(picker.select("2:00 PM"));
    }
}
