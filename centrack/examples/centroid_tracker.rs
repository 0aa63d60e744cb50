use centrack::{CentroidTracker, ObjectTracker, Rect, TrackerConfig, TrackerSnapshot};

fn print_snapshot(snapshot: &TrackerSnapshot) {
    for (id, centroid) in &snapshot.objects {
        println!("  Object ID {}: centroid {}", id, centroid);
    }
    println!("  Total unique so far: {}", snapshot.total_registered);
}

fn main() -> anyhow::Result<()> {
    println!("Testing CentroidTracker...");

    let mut tracker = CentroidTracker::try_new(TrackerConfig {
        max_disappeared: 2, // objects die after 2 frames without detection
        max_distance: 50.0, // maximum centroid jump for association
    })?;

    // Frame 1: Initial detections
    let frame1 = [
        Rect::new(10.0, 10.0, 50.0, 50.0),
        Rect::new(100.0, 100.0, 150.0, 150.0),
        Rect::new(200.0, 200.0, 240.0, 240.0),
    ];
    let snapshot = tracker.update(&frame1);
    println!("Frame 1: {} objects registered", snapshot.len());
    print_snapshot(&snapshot);

    // Frame 2: Objects move slightly
    let frame2 = [
        Rect::new(12.0, 12.0, 52.0, 52.0),
        Rect::new(102.0, 98.0, 152.0, 148.0),
        Rect::new(205.0, 195.0, 245.0, 235.0),
    ];
    let snapshot = tracker.update(&frame2);
    println!("\nFrame 2: {} objects updated", snapshot.len());
    print_snapshot(&snapshot);

    // Frame 3: Second object is not detected
    let frame3 = [
        Rect::new(14.0, 14.0, 54.0, 54.0),
        Rect::new(210.0, 190.0, 250.0, 230.0),
    ];
    let snapshot = tracker.update(&frame3);
    println!("\nFrame 3: {} objects (one missed)", snapshot.len());
    print_snapshot(&snapshot);

    // Frame 4: New object appears far from everything else
    let frame4 = [
        Rect::new(16.0, 16.0, 56.0, 56.0),
        Rect::new(300.0, 300.0, 340.0, 340.0),
    ];
    let snapshot = tracker.update(&frame4);
    println!("\nFrame 4: {} objects (new object appeared)", snapshot.len());
    print_snapshot(&snapshot);

    // Frames 5-7: Detector sees nothing
    for frame in 5..=7 {
        let snapshot = tracker.update::<f32>(&[]);
        println!("\nFrame {}: {} objects (no detections)", frame, snapshot.len());
        print_snapshot(&snapshot);
    }

    println!("\nLive objects: {}", ObjectTracker::num_objects(&tracker));
    println!("Total steps: {}", tracker.step_count());
    println!("Total unique objects: {}", tracker.total_registered());

    Ok(())
}
