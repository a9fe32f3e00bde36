//! Example that demonstrates converting between CPU masks and CPU lists.

fn main() {
    println!("=== cpumask README Example ===");

    let mask = cpumask::encode_list("0-9,32-35,40").unwrap();
    assert_eq!(mask, "10f000003ff");
    println!("As mask: {mask}");

    let list = cpumask::decode_mask(&mask).unwrap();
    assert_eq!(list, "0,1,2,3,4,5,6,7,8,9,32,33,34,35,40");
    println!("As list: {list}");

    let parsed: cpumask::Mask = mask.parse().unwrap();
    println!("As compact list: {}", cpumask::emit(parsed.cpus()));

    println!("README example completed successfully!");
}
